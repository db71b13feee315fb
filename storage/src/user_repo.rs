//! User repository: persistence and queries for users and referrals.
//!
//! External: SQLite via sqlx; callers use upsert_user/save_contact/
//! list_recipient_ids and the admin statistics queries.

use chrono::{Duration, Utc};
use funnel_core::RecipientId;
use sqlx::SqlitePool;
use tracing::info;

use crate::models::{BotStats, UserRecord, UserStats};

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub async fn new(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        let repo = Self { pool };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), sqlx::Error> {
        info!("Creating user tables if not exist");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                user_id INTEGER PRIMARY KEY,
                username TEXT,
                first_name TEXT,
                last_name TEXT,
                email TEXT,
                phone TEXT,
                ref_tag TEXT,
                do_not_disturb INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS referrals (
                user_id INTEGER NOT NULL,
                ref_tag TEXT NOT NULL,
                created_at TEXT NOT NULL,
                UNIQUE(user_id, ref_tag)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_created_at ON users(created_at)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Inserts or refreshes a user row. The referral tag is only set the
    /// first time: an existing tag wins over the incoming one.
    pub async fn upsert_user(
        &self,
        user_id: i64,
        username: Option<&str>,
        first_name: Option<&str>,
        last_name: Option<&str>,
        ref_tag: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO users (user_id, username, first_name, last_name, ref_tag, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(user_id) DO UPDATE SET
                username = excluded.username,
                first_name = excluded.first_name,
                last_name = excluded.last_name,
                ref_tag = COALESCE(users.ref_tag, excluded.ref_tag),
                updated_at = excluded.updated_at
            "#,
        )
        .bind(user_id)
        .bind(username)
        .bind(first_name)
        .bind(last_name)
        .bind(ref_tag)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Fills in contact fields. Absent values keep whatever is stored.
    pub async fn save_contact(
        &self,
        user_id: i64,
        email: Option<&str>,
        phone: Option<&str>,
        first_name: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE users
            SET email = COALESCE(?, email),
                phone = COALESCE(?, phone),
                first_name = COALESCE(?, first_name),
                updated_at = ?
            WHERE user_id = ?
            "#,
        )
        .bind(email)
        .bind(phone)
        .bind(first_name)
        .bind(Utc::now())
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        info!(user_id, "Saved contact fields");
        Ok(())
    }

    /// Records a referral transition, once per (user, tag).
    pub async fn save_referral(&self, user_id: i64, ref_tag: &str) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT OR IGNORE INTO referrals (user_id, ref_tag, created_at) VALUES (?, ?, ?)")
            .bind(user_id)
            .bind(ref_tag)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Snapshot of every known recipient id, for a broadcast step.
    pub async fn list_recipient_ids(&self) -> Result<Vec<RecipientId>, sqlx::Error> {
        let rows: Vec<(i64,)> = sqlx::query_as("SELECT user_id FROM users")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|(id,)| RecipientId(id)).collect())
    }

    pub async fn set_dnd(&self, user_id: i64, dnd: bool) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET do_not_disturb = ?, updated_at = ? WHERE user_id = ?")
            .bind(dnd)
            .bind(Utc::now())
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn get_dnd(&self, user_id: i64) -> Result<bool, sqlx::Error> {
        let row: Option<(bool,)> =
            sqlx::query_as("SELECT do_not_disturb FROM users WHERE user_id = ?")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(dnd,)| dnd).unwrap_or(false))
    }

    pub async fn user_stats(&self, user_id: i64) -> Result<Option<UserStats>, sqlx::Error> {
        sqlx::query_as::<_, UserStats>(
            "SELECT first_name, email, phone, do_not_disturb, created_at FROM users WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Aggregate statistics for the admin panel.
    pub async fn bot_stats(&self) -> Result<BotStats, sqlx::Error> {
        let now = Utc::now();
        let count = |sql: &'static str| {
            let pool = self.pool.clone();
            async move {
                let (n,): (i64,) = sqlx::query_as(sql).fetch_one(&pool).await?;
                Ok::<i64, sqlx::Error>(n)
            }
        };

        let new_since = |cutoff: chrono::DateTime<Utc>| {
            let pool = self.pool.clone();
            async move {
                let (n,): (i64,) =
                    sqlx::query_as("SELECT COUNT(*) FROM users WHERE created_at > ?")
                        .bind(cutoff)
                        .fetch_one(&pool)
                        .await?;
                Ok::<i64, sqlx::Error>(n)
            }
        };

        Ok(BotStats {
            total_users: count("SELECT COUNT(*) FROM users").await?,
            new_today: new_since(now - Duration::days(1)).await?,
            new_week: new_since(now - Duration::days(7)).await?,
            new_month: new_since(now - Duration::days(30)).await?,
            with_email: count("SELECT COUNT(*) FROM users WHERE email IS NOT NULL").await?,
            with_phone: count("SELECT COUNT(*) FROM users WHERE phone IS NOT NULL").await?,
            with_name: count("SELECT COUNT(*) FROM users WHERE first_name IS NOT NULL").await?,
            with_contact: count(
                "SELECT COUNT(*) FROM users WHERE email IS NOT NULL OR phone IS NOT NULL",
            )
            .await?,
            referrals: count("SELECT COUNT(*) FROM referrals").await?,
        })
    }

    /// Average hours between registration and leaving a contact, for the funnel view.
    pub async fn avg_hours_to_contact(&self) -> Result<i64, sqlx::Error> {
        let row: Option<(Option<f64>,)> = sqlx::query_as(
            r#"
            SELECT AVG((julianday(updated_at) - julianday(created_at)) * 24.0)
            FROM users
            WHERE email IS NOT NULL OR phone IS NOT NULL
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.and_then(|(h,)| h).unwrap_or(0.0) as i64)
    }

    pub async fn recent_users(&self, limit: i64, offset: i64) -> Result<Vec<UserRecord>, sqlx::Error> {
        sqlx::query_as::<_, UserRecord>(
            "SELECT * FROM users ORDER BY created_at DESC LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn total_users(&self) -> Result<i64, sqlx::Error> {
        let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }

    /// Users that left at least one contact field, newest first.
    pub async fn contacts(&self, limit: i64, offset: i64) -> Result<Vec<UserRecord>, sqlx::Error> {
        sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT * FROM users
            WHERE email IS NOT NULL OR phone IS NOT NULL
            ORDER BY created_at DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn contacts_count(&self) -> Result<i64, sqlx::Error> {
        let (n,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM users WHERE email IS NOT NULL OR phone IS NOT NULL")
                .fetch_one(&self.pool)
                .await?;
        Ok(n)
    }
}
