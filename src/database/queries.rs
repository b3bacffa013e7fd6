use crate::database::models::UserSession;
use anyhow::{Context, Result};
use sqlx::{Row, SqlitePool};

pub const USER_SESSION_KEY: &str = "userData";

// Raw key-value access
pub async fn get_value(pool: &SqlitePool, key: &str) -> Result<Option<String>> {
    let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| row.get("value")))
}

pub async fn set_value(pool: &SqlitePool, key: &str, value: &str) -> Result<()> {
    sqlx::query(
        "INSERT INTO kv_store (key, value) VALUES (?, ?)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn remove_value(pool: &SqlitePool, key: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM kv_store WHERE key = ?")
        .bind(key)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

// User session
pub async fn load_user_session(pool: &SqlitePool) -> Result<Option<UserSession>> {
    let Some(raw) = get_value(pool, USER_SESSION_KEY).await? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(session) => Ok(Some(session)),
        Err(e) => {
            // an unreadable session is treated as signed out
            tracing::error!("Error loading user data: {}", e);
            Ok(None)
        }
    }
}

pub async fn store_user_session(pool: &SqlitePool, session: &UserSession) -> Result<()> {
    let raw = serde_json::to_string(session).context("Failed to serialize user session")?;
    set_value(pool, USER_SESSION_KEY, &raw).await?;
    tracing::info!("Stored session for staff_id={}", session.id);
    Ok(())
}

pub async fn clear_user_session(pool: &SqlitePool) -> Result<()> {
    if remove_value(pool, USER_SESSION_KEY).await? {
        tracing::info!("Cleared stored user session");
    }
    Ok(())
}
