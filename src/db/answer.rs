use color_eyre::Result;

use super::models::MyAnswer;
use super::{is_unique_violation, Db};
use crate::names;

/// Outcome of a ledger write. The losing side of a concurrent double-submit
/// always sees `AlreadyAnswered`; it is never double-credited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    Recorded { is_correct: bool },
    AlreadyAnswered,
}

impl Db {
    /// Records an answer and, when correct, credits the fixed reward and the
    /// time tie-breaker in the same transaction. The UNIQUE(user_id,
    /// question_id) constraint is the only enforcement point for one answer
    /// per user per question, so retries are naturally idempotent.
    pub async fn record_answer(
        &self,
        user_id: i64,
        question_id: i64,
        selected_option: i64,
        is_correct: bool,
        time_taken_ms: i64,
    ) -> Result<RecordOutcome> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            "INSERT INTO answers (user_id, question_id, selected_option, is_correct, time_taken_ms)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(question_id)
        .bind(selected_option)
        .bind(is_correct)
        .bind(time_taken_ms)
        .execute(&mut *tx)
        .await;

        if let Err(err) = inserted {
            if is_unique_violation(&err) {
                return Ok(RecordOutcome::AlreadyAnswered);
            }
            return Err(err.into());
        }

        if is_correct {
            sqlx::query(
                "UPDATE users SET score = score + ?, total_time_ms = total_time_ms + ?
                 WHERE id = ?",
            )
            .bind(names::CORRECT_ANSWER_POINTS)
            .bind(time_taken_ms)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!(
            "answer recorded for user={user_id} question={question_id} correct={is_correct}"
        );
        Ok(RecordOutcome::Recorded { is_correct })
    }

    /// The user's answer to a given day's question, with the correct option
    /// attached for the reveal.
    pub async fn answer_for_day(
        &self,
        user_id: i64,
        season_id: i64,
        day_number: i64,
    ) -> Result<Option<MyAnswer>> {
        let answer = sqlx::query_as::<_, MyAnswer>(
            "SELECT a.*, q.correct_answer
             FROM answers a
             JOIN questions q ON a.question_id = q.id
             WHERE a.user_id = ? AND q.season_id = ? AND q.day_number = ?",
        )
        .bind(user_id)
        .bind(season_id)
        .bind(day_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(answer)
    }

    /// The fastest correct answer for a day's question, if anyone got it.
    pub async fn day_champion(
        &self,
        question_id: i64,
    ) -> Result<Option<super::models::DayChampion>> {
        let champion = sqlx::query_as::<_, super::models::DayChampion>(
            "SELECT u.name, u.profile_picture, u.facebook_url, a.time_taken_ms
             FROM answers a
             JOIN users u ON a.user_id = u.id
             WHERE a.question_id = ? AND a.is_correct = 1
             ORDER BY a.time_taken_ms ASC, a.id ASC LIMIT 1",
        )
        .bind(question_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(champion)
    }
}
