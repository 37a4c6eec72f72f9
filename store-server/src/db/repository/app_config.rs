//! App Config Repository
//!
//! Key/value table behind the admin surface. Last write wins; no versioning.

use super::{RepoError, RepoResult};
use shared::models::{AppConfig, AppConfigUpsert, ConfigValue};
use sqlx::{FromRow, SqlitePool};

/// Raw row with the value still JSON-encoded
#[derive(Debug, Clone, FromRow)]
struct AppConfigRow {
    id: i64,
    key: String,
    value: String,
    description: Option<String>,
}

impl TryFrom<AppConfigRow> for AppConfig {
    type Error = RepoError;

    fn try_from(row: AppConfigRow) -> RepoResult<AppConfig> {
        Ok(AppConfig {
            id: row.id,
            key: row.key,
            value: serde_json::from_str(&row.value)?,
            description: row.description,
        })
    }
}

pub async fn get_all(pool: &SqlitePool) -> RepoResult<Vec<AppConfig>> {
    let rows = sqlx::query_as::<_, AppConfigRow>(
        "SELECT id, key, value, description FROM app_config ORDER BY key",
    )
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(AppConfig::try_from).collect()
}

pub async fn get(pool: &SqlitePool, key: &str) -> RepoResult<Option<AppConfig>> {
    let row = sqlx::query_as::<_, AppConfigRow>(
        "SELECT id, key, value, description FROM app_config WHERE key = ?",
    )
    .bind(key)
    .fetch_optional(pool)
    .await?;
    row.map(AppConfig::try_from).transpose()
}

/// Convenience accessor for the value alone.
pub async fn get_value(pool: &SqlitePool, key: &str) -> RepoResult<Option<ConfigValue>> {
    Ok(get(pool, key).await?.map(|config| config.value))
}

pub async fn upsert(pool: &SqlitePool, data: AppConfigUpsert) -> RepoResult<AppConfig> {
    sqlx::query(
        "INSERT INTO app_config (key, value, description)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET
           value = excluded.value,
           description = excluded.description",
    )
    .bind(&data.key)
    .bind(serde_json::to_string(&data.value)?)
    .bind(&data.description)
    .execute(pool)
    .await?;

    get(pool, &data.key)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to upsert config".into()))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    /// In-memory SQLite pool with the config schema.
    pub(crate) async fn test_pool() -> SqlitePool {
        // Single connection: every pooled connection would otherwise get
        // its own empty :memory: database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::query(
            "CREATE TABLE app_config (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                key TEXT NOT NULL UNIQUE,
                value TEXT NOT NULL,
                description TEXT
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        pool
    }

    #[tokio::test]
    async fn upsert_then_get_round_trips_the_union() {
        let pool = test_pool().await;
        let upserted = upsert(
            &pool,
            AppConfigUpsert {
                key: "allowed_pincodes".into(),
                value: ConfigValue::StringList(vec!["560001".into(), "560102".into()]),
                description: Some("Serviceable pincodes".into()),
            },
        )
        .await
        .unwrap();
        assert!(upserted.value.contains("560102"));

        let fetched = get(&pool, "allowed_pincodes").await.unwrap().unwrap();
        assert_eq!(fetched.value.as_list().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn last_write_wins() {
        let pool = test_pool().await;
        for value in ["v1", "v2"] {
            upsert(
                &pool,
                AppConfigUpsert {
                    key: "banner".into(),
                    value: ConfigValue::String(value.into()),
                    description: None,
                },
            )
            .await
            .unwrap();
        }

        let all = get_all(&pool).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].value, ConfigValue::String("v2".into()));
    }

    #[tokio::test]
    async fn missing_key_is_none() {
        let pool = test_pool().await;
        assert!(get(&pool, "nope").await.unwrap().is_none());
    }
}
