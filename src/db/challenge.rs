use chrono::NaiveDate;
use color_eyre::Result;

use super::models::ChallengeLeaderboardRow;
use super::{is_unique_violation, Db};
use crate::names;

/// Outcome of a completion attempt. A conflicting insert means the user
/// already holds today's credit; it is reported, never re-applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    New,
    AlreadyCompleted,
}

impl Db {
    /// Awards a day's challenge once per (user, day). The UNIQUE constraint
    /// on user_challenges is the idempotency primitive; the score credit
    /// shares the insert's transaction so it can neither double-apply nor go
    /// missing.
    pub async fn complete_challenge(
        &self,
        user_id: i64,
        day_number: i64,
        points: i64,
    ) -> Result<CompletionOutcome> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            "INSERT INTO user_challenges (user_id, day_number, points) VALUES (?, ?, ?)",
        )
        .bind(user_id)
        .bind(day_number)
        .bind(points)
        .execute(&mut *tx)
        .await;

        if let Err(err) = inserted {
            if is_unique_violation(&err) {
                return Ok(CompletionOutcome::AlreadyCompleted);
            }
            return Err(err.into());
        }

        sqlx::query("UPDATE users SET score = score + ? WHERE id = ?")
            .bind(points)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!("challenge day {day_number} completed by user={user_id} (+{points})");
        Ok(CompletionOutcome::New)
    }

    pub async fn completed_days(&self, user_id: i64) -> Result<Vec<i64>> {
        let days: Vec<i64> = sqlx::query_scalar(
            "SELECT day_number FROM user_challenges WHERE user_id = ? ORDER BY day_number",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(days)
    }

    pub async fn challenge_leaderboard(&self) -> Result<Vec<ChallengeLeaderboardRow>> {
        let rows = sqlx::query_as::<_, ChallengeLeaderboardRow>(
            "SELECT u.name, u.facebook_url, SUM(uc.points) AS total_points,
             COUNT(uc.day_number) AS completed_count
             FROM user_challenges uc
             JOIN users u ON uc.user_id = u.id
             GROUP BY uc.user_id
             ORDER BY total_points DESC, completed_count DESC
             LIMIT ?",
        )
        .bind(names::LEADERBOARD_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// One share reward per user per calendar day, same transactional shape
    /// as challenge completion.
    pub async fn record_share(&self, user_id: i64, date: NaiveDate) -> Result<CompletionOutcome> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query("INSERT INTO share_logs (user_id, share_date) VALUES (?, ?)")
            .bind(user_id)
            .bind(date)
            .execute(&mut *tx)
            .await;

        if let Err(err) = inserted {
            if is_unique_violation(&err) {
                return Ok(CompletionOutcome::AlreadyCompleted);
            }
            return Err(err.into());
        }

        sqlx::query("UPDATE users SET score = score + ? WHERE id = ?")
            .bind(names::SHARE_REWARD_POINTS)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!("share reward granted to user={user_id} for {date}");
        Ok(CompletionOutcome::New)
    }
}
