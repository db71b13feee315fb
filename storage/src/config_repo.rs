//! Key/value bot configuration, including the stored welcome chain.

use funnel_core::MessageUnit;
use serde_json::Value;
use sqlx::SqlitePool;
use tracing::{info, warn};

/// Key the welcome chain is stored under.
pub const WELCOME_CHAIN_KEY: &str = "welcome_chain";

const DEFAULT_WELCOME_TEXT: &str =
    "Welcome! The welcome chain has not been configured yet.";

#[derive(Clone)]
pub struct ConfigRepository {
    pool: SqlitePool,
}

impl ConfigRepository {
    pub async fn new(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        let repo = Self { pool };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), sqlx::Error> {
        info!("Creating config table if not exists");
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS bot_config (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn get_value(&self, key: &str) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM bot_config WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(v,)| v))
    }

    pub async fn set_value(&self, key: &str, value: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO bot_config (key, value) VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Loads the welcome chain.
    ///
    /// No stored value yields a single default text unit so new users are
    /// never greeted with silence. A stored single object is treated as a
    /// one-element chain. Malformed JSON yields an empty chain.
    pub async fn welcome_chain(&self) -> Result<Vec<MessageUnit>, sqlx::Error> {
        let Some(raw) = self.get_value(WELCOME_CHAIN_KEY).await? else {
            return Ok(vec![MessageUnit::text(DEFAULT_WELCOME_TEXT)]);
        };

        let value: Value = match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "Stored welcome chain is not valid JSON");
                return Ok(Vec::new());
            }
        };

        let items = match value {
            Value::Array(items) => items,
            other @ Value::Object(_) => vec![other],
            _ => {
                warn!("Stored welcome chain is neither an array nor an object");
                return Ok(Vec::new());
            }
        };

        let mut units = Vec::with_capacity(items.len());
        for item in items {
            match serde_json::from_value::<MessageUnit>(item) {
                Ok(unit) => units.push(unit),
                Err(e) => warn!(error = %e, "Skipping malformed welcome chain entry"),
            }
        }
        Ok(units)
    }

    pub async fn save_welcome_chain(&self, units: &[MessageUnit]) -> Result<(), sqlx::Error> {
        // Serialization of MessageUnit cannot fail; fall back to [] anyway.
        let json = serde_json::to_string(units).unwrap_or_else(|_| "[]".to_string());
        self.set_value(WELCOME_CHAIN_KEY, &json).await?;
        info!(steps = units.len(), "Saved welcome chain");
        Ok(())
    }
}
