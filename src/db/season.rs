use chrono::NaiveDate;
use color_eyre::Result;

use super::models::{ScheduleDay, Season};
use super::Db;

impl Db {
    /// The single season the resolver works against. At most one season may
    /// be active; the LIMIT guards against seed data violating that.
    pub async fn active_season(&self) -> Result<Option<Season>> {
        let season = sqlx::query_as::<_, Season>(
            "SELECT id, year_hijri, start_date, end_date, total_days, is_active, winner_user_id
             FROM seasons WHERE is_active = 1 LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(season)
    }

    pub async fn create_season(
        &self,
        year_hijri: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        total_days: i64,
    ) -> Result<i64> {
        // Activating a season deactivates every other one, preserving the
        // single-active-season invariant.
        let mut tx = self.pool.begin().await?;
        sqlx::query("UPDATE seasons SET is_active = 0")
            .execute(&mut *tx)
            .await?;
        let season_id: i64 = sqlx::query_scalar(
            "INSERT INTO seasons (year_hijri, start_date, end_date, total_days, is_active)
             VALUES (?, ?, ?, ?, 1) RETURNING id",
        )
        .bind(year_hijri)
        .bind(start_date)
        .bind(end_date)
        .bind(total_days)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        tracing::info!("season {year_hijri} created: id={season_id}");
        Ok(season_id)
    }

    pub async fn schedule_for_date(
        &self,
        season_id: i64,
        date: NaiveDate,
    ) -> Result<Option<ScheduleDay>> {
        let day = sqlx::query_as::<_, ScheduleDay>(
            "SELECT * FROM prayers_schedule WHERE season_id = ? AND gregorian_date = ?",
        )
        .bind(season_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(day)
    }

    /// The active season's full imsakia, in day order.
    pub async fn active_schedule(&self) -> Result<Vec<ScheduleDay>> {
        let days = sqlx::query_as::<_, ScheduleDay>(
            "SELECT * FROM prayers_schedule
             WHERE season_id = (SELECT id FROM seasons WHERE is_active = 1)
             ORDER BY day_number",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(days)
    }

    pub async fn upsert_schedule_day(
        &self,
        season_id: i64,
        day_number: i64,
        day_name: Option<&str>,
        gregorian_date: NaiveDate,
        times: &[Option<&str>; 6],
    ) -> Result<()> {
        let [fajr, sunrise, dhuhr, asr, maghrib, isha] = times;
        sqlx::query(
            "INSERT OR REPLACE INTO prayers_schedule
             (season_id, day_number, day_name, gregorian_date, fajr, sunrise, dhuhr, asr, maghrib, isha)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(season_id)
        .bind(day_number)
        .bind(day_name)
        .bind(gregorian_date)
        .bind(fajr)
        .bind(sunrise)
        .bind(dhuhr)
        .bind(asr)
        .bind(maghrib)
        .bind(isha)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Records the season winner, making `ended` the terminal state. The
    /// winner is the current leaderboard head.
    pub async fn announce_winner(&self) -> Result<Option<i64>> {
        let winner: Option<i64> = sqlx::query_scalar(
            "SELECT id FROM users WHERE role = 'user'
             ORDER BY score DESC, total_time_ms ASC, id ASC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        let Some(winner_id) = winner else {
            return Ok(None);
        };

        let affected = sqlx::query("UPDATE seasons SET winner_user_id = ? WHERE is_active = 1")
            .bind(winner_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if affected == 0 {
            return Ok(None);
        }

        tracing::info!("season winner announced: user_id={winner_id}");
        Ok(Some(winner_id))
    }
}
