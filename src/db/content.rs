use color_eyre::Result;

use super::models::{ContentRow, PlaylistRow, VideoRow};
use super::Db;

impl Db {
    pub async fn active_content(&self, content_type: &str) -> Result<Vec<ContentRow>> {
        let rows = sqlx::query_as::<_, ContentRow>(
            "SELECT * FROM content WHERE type = ? AND is_active = 1 ORDER BY sort_order",
        )
        .bind(content_type)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn all_content(&self) -> Result<Vec<ContentRow>> {
        let rows =
            sqlx::query_as::<_, ContentRow>("SELECT * FROM content ORDER BY type, sort_order")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows)
    }

    pub async fn create_content(
        &self,
        content_type: &str,
        title: Option<&str>,
        body: Option<&str>,
        sort_order: i64,
    ) -> Result<i64> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO content (type, title, body, sort_order, is_active)
             VALUES (?, ?, ?, ?, 1) RETURNING id",
        )
        .bind(content_type)
        .bind(title)
        .bind(body)
        .bind(sort_order)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    pub async fn update_content(
        &self,
        id: i64,
        content_type: &str,
        title: Option<&str>,
        body: Option<&str>,
        sort_order: i64,
        is_active: bool,
    ) -> Result<bool> {
        let affected = sqlx::query(
            "UPDATE content SET type = ?, title = ?, body = ?, sort_order = ?, is_active = ?
             WHERE id = ?",
        )
        .bind(content_type)
        .bind(title)
        .bind(body)
        .bind(sort_order)
        .bind(is_active)
        .bind(id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(affected > 0)
    }

    pub async fn delete_content(&self, id: i64) -> Result<bool> {
        let affected = sqlx::query("DELETE FROM content WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(affected > 0)
    }

    // --- playlists ---

    pub async fn playlists(&self, only_active: bool) -> Result<Vec<PlaylistRow>> {
        let filter = if only_active { "WHERE p.is_active = 1" } else { "" };
        let sql = format!(
            "SELECT p.*,
             (SELECT COUNT(*) FROM playlist_videos v WHERE v.playlist_id = p.id) AS video_count
             FROM playlists p {filter} ORDER BY p.sort_order"
        );
        let rows = sqlx::query_as::<_, PlaylistRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    pub async fn playlist(&self, id: i64, only_active: bool) -> Result<Option<PlaylistRow>> {
        let filter = if only_active { "AND p.is_active = 1" } else { "" };
        let sql = format!(
            "SELECT p.*,
             (SELECT COUNT(*) FROM playlist_videos v WHERE v.playlist_id = p.id) AS video_count
             FROM playlists p WHERE p.id = ? {filter}"
        );
        let row = sqlx::query_as::<_, PlaylistRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    pub async fn playlist_videos(&self, playlist_id: i64) -> Result<Vec<VideoRow>> {
        let rows = sqlx::query_as::<_, VideoRow>(
            "SELECT * FROM playlist_videos WHERE playlist_id = ? ORDER BY sort_order",
        )
        .bind(playlist_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn create_playlist(
        &self,
        title: &str,
        description: Option<&str>,
        thumbnail_url: Option<&str>,
        sort_order: i64,
    ) -> Result<i64> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO playlists (title, description, thumbnail_url, sort_order, is_active)
             VALUES (?, ?, ?, ?, 1) RETURNING id",
        )
        .bind(title)
        .bind(description)
        .bind(thumbnail_url)
        .bind(sort_order)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    pub async fn update_playlist(
        &self,
        id: i64,
        title: &str,
        description: Option<&str>,
        thumbnail_url: Option<&str>,
        sort_order: i64,
        is_active: bool,
    ) -> Result<bool> {
        let affected = sqlx::query(
            "UPDATE playlists SET title = ?, description = ?, thumbnail_url = ?,
             sort_order = ?, is_active = ? WHERE id = ?",
        )
        .bind(title)
        .bind(description)
        .bind(thumbnail_url)
        .bind(sort_order)
        .bind(is_active)
        .bind(id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(affected > 0)
    }

    /// Deletes a playlist and its videos.
    pub async fn delete_playlist(&self, id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM playlist_videos WHERE playlist_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let affected = sqlx::query("DELETE FROM playlists WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tx.commit().await?;

        Ok(affected > 0)
    }

    pub async fn add_video(
        &self,
        playlist_id: i64,
        title: &str,
        video_url: &str,
        thumbnail_url: Option<&str>,
        duration: Option<&str>,
        sort_order: i64,
    ) -> Result<i64> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO playlist_videos (playlist_id, title, video_url, thumbnail_url, duration, sort_order)
             VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(playlist_id)
        .bind(title)
        .bind(video_url)
        .bind(thumbnail_url)
        .bind(duration)
        .bind(sort_order)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_video(
        &self,
        id: i64,
        title: &str,
        video_url: &str,
        thumbnail_url: Option<&str>,
        duration: Option<&str>,
        sort_order: i64,
    ) -> Result<bool> {
        let affected = sqlx::query(
            "UPDATE playlist_videos SET title = ?, video_url = ?, thumbnail_url = ?,
             duration = ?, sort_order = ? WHERE id = ?",
        )
        .bind(title)
        .bind(video_url)
        .bind(thumbnail_url)
        .bind(duration)
        .bind(sort_order)
        .bind(id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(affected > 0)
    }

    pub async fn delete_video(&self, id: i64) -> Result<bool> {
        let affected = sqlx::query("DELETE FROM playlist_videos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(affected > 0)
    }
}
