//! Favorites store operations
//!
//! A flat per-user bookmark list, independent of playlist membership.
//! Unique on (user_id, video_id); no cascade relationships.

use crate::auth::authorize_owner;
use crate::db::models::{Favorite, VideoSelection};
use crate::{Error, Result};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::debug;

/// Bookmark a video for a user. Duplicate (user, video) yields Conflict.
pub async fn add(pool: &SqlitePool, user_id: &str, video: &VideoSelection) -> Result<Favorite> {
    if user_id.trim().is_empty() || video.video_id.trim().is_empty() || video.title.trim().is_empty()
    {
        return Err(Error::InvalidInput(
            "user_id, video_id and title are required".to_string(),
        ));
    }

    let result = sqlx::query(
        r#"
        INSERT INTO favorites (user_id, title, channel_title, thumbnail_url, video_id, source_url)
        VALUES (?, ?, ?, ?, ?, ?)
        ON CONFLICT(user_id, video_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(&video.title)
    .bind(&video.channel_title)
    .bind(&video.thumbnail_url)
    .bind(&video.video_id)
    .bind(&video.source_url)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::Conflict(format!(
            "video already in favorites: {}",
            video.video_id
        )));
    }
    debug!(user_id, video_id = %video.video_id, "added favorite");

    let row = sqlx::query(
        r#"
        SELECT id, user_id, title, channel_title, thumbnail_url, video_id, source_url, created_at
        FROM favorites
        WHERE user_id = ? AND video_id = ?
        "#,
    )
    .bind(user_id)
    .bind(&video.video_id)
    .fetch_one(pool)
    .await?;

    Ok(map_favorite_row(row))
}

/// All bookmarks for a user, newest first
pub async fn list_for_user(pool: &SqlitePool, user_id: &str) -> Result<Vec<Favorite>> {
    let rows = sqlx::query(
        r#"
        SELECT id, user_id, title, channel_title, thumbnail_url, video_id, source_url, created_at
        FROM favorites
        WHERE user_id = ?
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(map_favorite_row).collect())
}

/// Remove a bookmark by id, enforcing ownership
pub async fn remove(pool: &SqlitePool, favorite_id: i64, caller: Option<&str>) -> Result<()> {
    let row = sqlx::query(
        r#"
        SELECT id, user_id, title, channel_title, thumbnail_url, video_id, source_url, created_at
        FROM favorites
        WHERE id = ?
        "#,
    )
    .bind(favorite_id)
    .fetch_optional(pool)
    .await?;

    let favorite = row
        .map(map_favorite_row)
        .ok_or_else(|| Error::NotFound(format!("favorite not found: {}", favorite_id)))?;
    authorize_owner(caller, &favorite.user_id)?;

    sqlx::query("DELETE FROM favorites WHERE id = ?")
        .bind(favorite_id)
        .execute(pool)
        .await?;
    debug!(favorite_id, "removed favorite");

    Ok(())
}

fn map_favorite_row(row: SqliteRow) -> Favorite {
    Favorite {
        id: row.get("id"),
        user_id: row.get("user_id"),
        title: row.get("title"),
        channel_title: row.get("channel_title"),
        thumbnail_url: row.get("thumbnail_url"),
        video_id: row.get("video_id"),
        source_url: row.get("source_url"),
        created_at: row.get("created_at"),
    }
}
