use color_eyre::Result;

use super::models::{AnswerWithUser, DayResult, QuestionRow, QuestionWithStats};
use super::Db;

const QUESTION_COLUMNS: &str = "id, season_id, day_number, question_text, \
     option1, option2, option3, option4, option5, correct_answer, timer_seconds, status";

impl Db {
    /// The question served to players: only `published` rows are visible.
    pub async fn published_question(
        &self,
        season_id: i64,
        day_number: i64,
    ) -> Result<Option<QuestionRow>> {
        let question = sqlx::query_as::<_, QuestionRow>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions
             WHERE season_id = ? AND day_number = ? AND status = 'published'"
        ))
        .bind(season_id)
        .bind(day_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(question)
    }

    pub async fn question(&self, question_id: i64) -> Result<Option<QuestionRow>> {
        let question = sqlx::query_as::<_, QuestionRow>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE id = ?"
        ))
        .bind(question_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(question)
    }

    pub async fn question_for_day(
        &self,
        season_id: i64,
        day_number: i64,
    ) -> Result<Option<QuestionRow>> {
        let question = sqlx::query_as::<_, QuestionRow>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE season_id = ? AND day_number = ?"
        ))
        .bind(season_id)
        .bind(day_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(question)
    }

    /// The day's question plus aggregate correct/total counts, for the
    /// post-maghrib reveal.
    pub async fn day_result(&self, season_id: i64, day_number: i64) -> Result<Option<DayResult>> {
        let result = sqlx::query_as::<_, DayResult>(
            "SELECT q.*,
             (SELECT COUNT(*) FROM answers a WHERE a.question_id = q.id AND a.is_correct = 1) AS correct_count,
             (SELECT COUNT(*) FROM answers a WHERE a.question_id = q.id) AS total_answers
             FROM questions q WHERE q.season_id = ? AND q.day_number = ?",
        )
        .bind(season_id)
        .bind(day_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn upsert_question(
        &self,
        season_id: i64,
        day_number: i64,
        question_text: &str,
        options: &[String; 5],
        correct_answer: i64,
        timer_seconds: i64,
        status: &str,
    ) -> Result<i64> {
        let id: i64 = sqlx::query_scalar(
            "INSERT OR REPLACE INTO questions
             (season_id, day_number, question_text, option1, option2, option3, option4, option5,
              correct_answer, timer_seconds, status)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(season_id)
        .bind(day_number)
        .bind(question_text)
        .bind(&options[0])
        .bind(&options[1])
        .bind(&options[2])
        .bind(&options[3])
        .bind(&options[4])
        .bind(correct_answer)
        .bind(timer_seconds)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("question upserted for season={season_id} day={day_number}: id={id}");
        Ok(id)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_question(
        &self,
        question_id: i64,
        question_text: &str,
        options: &[String; 5],
        correct_answer: i64,
        timer_seconds: i64,
        status: &str,
    ) -> Result<bool> {
        let affected = sqlx::query(
            "UPDATE questions SET question_text = ?, option1 = ?, option2 = ?, option3 = ?,
             option4 = ?, option5 = ?, correct_answer = ?, timer_seconds = ?, status = ?
             WHERE id = ?",
        )
        .bind(question_text)
        .bind(&options[0])
        .bind(&options[1])
        .bind(&options[2])
        .bind(&options[3])
        .bind(&options[4])
        .bind(correct_answer)
        .bind(timer_seconds)
        .bind(status)
        .bind(question_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(affected > 0)
    }

    pub async fn delete_question(&self, question_id: i64) -> Result<bool> {
        let affected = sqlx::query("DELETE FROM questions WHERE id = ?")
            .bind(question_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(affected > 0)
    }

    pub async fn questions_for_season(&self, season_id: i64) -> Result<Vec<QuestionRow>> {
        let questions = sqlx::query_as::<_, QuestionRow>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE season_id = ? ORDER BY day_number"
        ))
        .bind(season_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(questions)
    }

    pub async fn questions_with_stats(&self) -> Result<Vec<QuestionWithStats>> {
        let questions = sqlx::query_as::<_, QuestionWithStats>(
            "SELECT q.*,
             (SELECT COUNT(*) FROM answers a WHERE a.question_id = q.id) AS total_answers,
             (SELECT COUNT(*) FROM answers a WHERE a.question_id = q.id AND a.is_correct = 1) AS correct_answers
             FROM questions q ORDER BY q.day_number",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(questions)
    }

    /// Every answer to a question, best first, for the admin review view.
    pub async fn answers_for_question(&self, question_id: i64) -> Result<Vec<AnswerWithUser>> {
        let answers = sqlx::query_as::<_, AnswerWithUser>(
            "SELECT a.*, u.name AS user_name, u.phone AS user_phone
             FROM answers a
             JOIN users u ON a.user_id = u.id
             WHERE a.question_id = ?
             ORDER BY a.is_correct DESC, a.time_taken_ms ASC",
        )
        .bind(question_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(answers)
    }
}
