//! Music catalog operations
//!
//! Deduplicated store of video metadata keyed by (owning user, external
//! video id). Rows are created on first save or first playlist-add and act
//! as the user's search/listen history.

use crate::db::models::{Music, VideoSelection};
use crate::{Error, Result};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// Default number of rows returned by [`list_search_history`]
pub const DEFAULT_HISTORY_LIMIT: i64 = 5;

/// Create or update the catalog row for (user, video).
///
/// Idempotent: a second call with the same pair updates mutable metadata
/// and returns the same row id. The favorite flag is left untouched.
pub async fn upsert_for_user(
    pool: &SqlitePool,
    user_id: &str,
    video: &VideoSelection,
) -> Result<Music> {
    if user_id.trim().is_empty() || video.video_id.trim().is_empty() || video.title.trim().is_empty()
    {
        return Err(Error::InvalidInput(
            "user_id, video_id and title are required".to_string(),
        ));
    }

    sqlx::query(
        r#"
        INSERT INTO musics (video_id, user_id, title, channel_title, thumbnail_url, source_url)
        VALUES (?, ?, ?, ?, ?, ?)
        ON CONFLICT(user_id, video_id) DO UPDATE SET
            title = excluded.title,
            channel_title = excluded.channel_title,
            thumbnail_url = excluded.thumbnail_url,
            source_url = excluded.source_url,
            updated_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(&video.video_id)
    .bind(user_id)
    .bind(&video.title)
    .bind(&video.channel_title)
    .bind(&video.thumbnail_url)
    .bind(&video.source_url)
    .execute(pool)
    .await?;

    load_by_video(pool, user_id, &video.video_id)
        .await?
        .ok_or_else(|| Error::Internal(format!("music row vanished after upsert: {}", video.video_id)))
}

/// Load a catalog row by (user, video)
pub async fn load_by_video(
    pool: &SqlitePool,
    user_id: &str,
    video_id: &str,
) -> Result<Option<Music>> {
    let row = sqlx::query(
        r#"
        SELECT id, video_id, user_id, title, channel_title, thumbnail_url, source_url,
               is_fav, created_at, updated_at
        FROM musics
        WHERE user_id = ? AND video_id = ?
        "#,
    )
    .bind(user_id)
    .bind(video_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(map_music_row))
}

/// Flip the favorite flag for (user, video), returning the new state
pub async fn toggle_favorite(pool: &SqlitePool, user_id: &str, video_id: &str) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE musics
        SET is_fav = NOT is_fav, updated_at = CURRENT_TIMESTAMP
        WHERE user_id = ? AND video_id = ?
        "#,
    )
    .bind(user_id)
    .bind(video_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("music not found: {}", video_id)));
    }

    let is_fav: bool =
        sqlx::query_scalar("SELECT is_fav FROM musics WHERE user_id = ? AND video_id = ?")
            .bind(user_id)
            .bind(video_id)
            .fetch_one(pool)
            .await?;

    Ok(is_fav)
}

/// Most recently encountered videos for a user, newest first
pub async fn list_search_history(
    pool: &SqlitePool,
    user_id: &str,
    limit: i64,
) -> Result<Vec<Music>> {
    let rows = sqlx::query(
        r#"
        SELECT id, video_id, user_id, title, channel_title, thumbnail_url, source_url,
               is_fav, created_at, updated_at
        FROM musics
        WHERE user_id = ?
        ORDER BY created_at DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(map_music_row).collect())
}

/// All favorited catalog rows for a user, newest first
pub async fn list_favorites(pool: &SqlitePool, user_id: &str) -> Result<Vec<Music>> {
    let rows = sqlx::query(
        r#"
        SELECT id, video_id, user_id, title, channel_title, thumbnail_url, source_url,
               is_fav, created_at, updated_at
        FROM musics
        WHERE user_id = ? AND is_fav = 1
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(map_music_row).collect())
}

fn map_music_row(row: SqliteRow) -> Music {
    Music {
        id: row.get("id"),
        video_id: row.get("video_id"),
        user_id: row.get("user_id"),
        title: row.get("title"),
        channel_title: row.get("channel_title"),
        thumbnail_url: row.get("thumbnail_url"),
        source_url: row.get("source_url"),
        is_fav: row.get("is_fav"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
