use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use color_eyre::Result;

use super::models::{
    AdminUserDetail, AdminUserRow, DashboardStats, LeaderboardRow, Profile, ResultRow, UserAccount,
};
use super::{is_unique_violation, Db};
use crate::names;

/// Outcome of a registration attempt; the phone UNIQUE constraint is the
/// duplicate check.
#[derive(Debug)]
pub enum RegisterOutcome {
    Created { user_id: i64 },
    PhoneTaken,
}

const ACCOUNT_COLUMNS: &str = "id, name, phone, score, role, facebook_url";

impl Db {
    pub async fn create_user(
        &self,
        name: &str,
        phone: &str,
        national_id: &str,
        password: &str,
        facebook_url: Option<&str>,
        role: &str,
    ) -> Result<RegisterOutcome> {
        let password_hash = hash_password(password)?;

        let inserted: Result<i64, sqlx::Error> = sqlx::query_scalar(
            "INSERT INTO users (name, phone, national_id, password_hash, agreed_terms, facebook_url, role)
             VALUES (?, ?, ?, ?, 1, ?, ?) RETURNING id",
        )
        .bind(name)
        .bind(phone)
        .bind(national_id)
        .bind(&password_hash)
        .bind(facebook_url)
        .bind(role)
        .fetch_one(&self.pool)
        .await;

        match inserted {
            Ok(user_id) => {
                tracing::info!("new user created: id={user_id}");
                Ok(RegisterOutcome::Created { user_id })
            }
            Err(err) if is_unique_violation(&err) => Ok(RegisterOutcome::PhoneTaken),
            Err(err) => Err(err.into()),
        }
    }

    /// Checks credentials; `None` means unknown phone or wrong password.
    pub async fn verify_login(&self, phone: &str, password: &str) -> Result<Option<UserAccount>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT password_hash FROM users WHERE phone = ?")
                .bind(phone)
                .fetch_optional(&self.pool)
                .await?;

        let Some((stored_hash,)) = row else {
            return Ok(None);
        };

        if !verify_password(password, &stored_hash) {
            return Ok(None);
        }

        let user = sqlx::query_as::<_, UserAccount>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM users WHERE phone = ?"
        ))
        .bind(phone)
        .fetch_one(&self.pool)
        .await?;

        Ok(Some(user))
    }

    pub async fn profile(&self, user_id: i64) -> Result<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(
            "SELECT id, name, phone, score, total_time_ms, facebook_url, profile_picture,
             (SELECT COUNT(*) + 1 FROM users u2 WHERE u2.score > users.score) AS rank
             FROM users WHERE id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    /// Updates profile fields; a password change requires the current one.
    /// Returns false when the current password does not verify.
    pub async fn update_profile(
        &self,
        user_id: i64,
        name: &str,
        facebook_url: Option<&str>,
        profile_picture: Option<&str>,
        password_change: Option<(&str, &str)>,
    ) -> Result<bool> {
        let new_hash = match password_change {
            Some((current, new)) => {
                let stored: Option<(String,)> =
                    sqlx::query_as("SELECT password_hash FROM users WHERE id = ?")
                        .bind(user_id)
                        .fetch_optional(&self.pool)
                        .await?;
                let Some((stored_hash,)) = stored else {
                    return Ok(false);
                };
                if !verify_password(current, &stored_hash) {
                    return Ok(false);
                }
                Some(hash_password(new)?)
            }
            None => None,
        };

        sqlx::query(
            "UPDATE users SET name = ?, facebook_url = ?, profile_picture = ?,
             password_hash = COALESCE(?, password_hash)
             WHERE id = ?",
        )
        .bind(name)
        .bind(facebook_url)
        .bind(profile_picture)
        .bind(new_hash)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(true)
    }

    /// Ranked standings: score desc, cumulative time asc, id as the
    /// deterministic final tiebreak.
    ///
    /// `mask_today = Some((season_id, day_number))` applies the suspense rule:
    /// points earned for today's question are subtracted from the displayed
    /// score until the result is revealed.
    pub async fn leaderboard(&self, mask_today: Option<(i64, i64)>) -> Result<Vec<LeaderboardRow>> {
        const ORDER: &str = "score DESC, total_time_ms ASC, id ASC";

        let rows = match mask_today {
            Some((season_id, day_number)) => {
                let sql = format!(
                    "SELECT *, ROW_NUMBER() OVER (ORDER BY {ORDER}) AS rank FROM (
                         SELECT u.id, u.name, u.total_time_ms, u.facebook_url,
                                u.score - COALESCE((
                                    SELECT ? FROM answers a
                                    JOIN questions q ON a.question_id = q.id
                                    WHERE a.user_id = u.id AND q.season_id = ?
                                      AND q.day_number = ? AND a.is_correct = 1
                                ), 0) AS score
                         FROM users u WHERE u.role = 'user'
                     ) ORDER BY {ORDER} LIMIT ?"
                );
                sqlx::query_as::<_, LeaderboardRow>(&sql)
                    .bind(names::CORRECT_ANSWER_POINTS)
                    .bind(season_id)
                    .bind(day_number)
                    .bind(names::LEADERBOARD_LIMIT)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!(
                    "SELECT *, ROW_NUMBER() OVER (ORDER BY {ORDER}) AS rank FROM (
                         SELECT id, name, score, total_time_ms, facebook_url
                         FROM users WHERE role = 'user'
                     ) ORDER BY {ORDER} LIMIT ?"
                );
                sqlx::query_as::<_, LeaderboardRow>(&sql)
                    .bind(names::LEADERBOARD_LIMIT)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(rows)
    }

    // --- admin surface ---

    pub async fn all_users(&self) -> Result<Vec<AdminUserRow>> {
        let users = sqlx::query_as::<_, AdminUserRow>(
            "SELECT id, name, phone, score, total_time_ms, role, created_at,
             (SELECT COUNT(*) FROM answers WHERE user_id = users.id) AS answers_count
             FROM users ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    pub async fn user_detail(&self, user_id: i64) -> Result<Option<AdminUserDetail>> {
        let user = sqlx::query_as::<_, AdminUserDetail>(
            "SELECT id, name, phone, national_id, agreed_terms, facebook_url, profile_picture,
             role, score, total_time_ms, created_at
             FROM users WHERE id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn admin_update_user(
        &self,
        user_id: i64,
        name: &str,
        phone: &str,
        score: i64,
        role: &str,
        password: Option<&str>,
    ) -> Result<bool> {
        let new_hash = password.map(hash_password).transpose()?;

        let affected = sqlx::query(
            "UPDATE users SET name = ?, phone = ?, score = ?, role = ?,
             password_hash = COALESCE(?, password_hash)
             WHERE id = ?",
        )
        .bind(name)
        .bind(phone)
        .bind(score)
        .bind(role)
        .bind(new_hash)
        .bind(user_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(affected > 0)
    }

    pub async fn delete_user(&self, user_id: i64) -> Result<bool> {
        let affected = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(affected > 0)
    }

    pub async fn admin_results(&self) -> Result<Vec<ResultRow>> {
        let rows = sqlx::query_as::<_, ResultRow>(
            "SELECT u.id, u.name, u.phone, u.score, u.total_time_ms,
             (SELECT COUNT(*) FROM answers a WHERE a.user_id = u.id AND a.is_correct = 1) AS correct_answers,
             (SELECT COUNT(*) FROM answers a WHERE a.user_id = u.id) AS total_answers,
             ROW_NUMBER() OVER (ORDER BY u.score DESC, u.total_time_ms ASC, u.id ASC) AS rank
             FROM users u WHERE u.role = 'user'
             ORDER BY u.score DESC, u.total_time_ms ASC, u.id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        let stats = sqlx::query_as::<_, DashboardStats>(
            "SELECT
             (SELECT COUNT(*) FROM users WHERE role = 'user') AS total_users,
             (SELECT COUNT(*) FROM answers) AS total_answers,
             (SELECT COUNT(*) FROM questions WHERE status = 'published') AS published_questions,
             (SELECT COUNT(*) FROM content) AS total_content,
             (SELECT COUNT(*) FROM playlists) AS total_playlists",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| color_eyre::eyre::eyre!("failed to hash password: {e}"))
}

fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
