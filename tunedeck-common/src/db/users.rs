//! User mirror operations
//!
//! Users live in the external identity provider; rows here are a lazy local
//! mirror keyed by the provider's subject claim.

use crate::db::models::User;
use crate::Result;
use sqlx::{Row, SqlitePool};

/// Create or refresh the local mirror row for a verified caller.
///
/// Missing claim fields never blank out previously stored values.
pub async fn upsert_user(
    pool: &SqlitePool,
    id: &str,
    display_name: Option<&str>,
    email: Option<&str>,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO users (id, display_name, email)
        VALUES (?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            display_name = COALESCE(excluded.display_name, users.display_name),
            email = COALESCE(excluded.email, users.email),
            updated_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(id)
    .bind(display_name)
    .bind(email)
    .execute(pool)
    .await?;

    Ok(())
}

/// Load a mirrored user by id
pub async fn load_user(pool: &SqlitePool, id: &str) -> Result<Option<User>> {
    let row = sqlx::query(
        r#"
        SELECT id, display_name, email, created_at, updated_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| User {
        id: row.get("id"),
        display_name: row.get("display_name"),
        email: row.get("email"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }))
}
