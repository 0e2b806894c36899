//! Playlist store operations
//!
//! Playlists are named, ordered collections of catalog entries per user.
//! Track membership goes through the playlist_entries junction; the
//! UNIQUE(playlist_id, music_id) constraint is what makes concurrent
//! duplicate adds resolve to exactly one row.

use crate::auth::authorize_owner;
use crate::db::models::{Playlist, PlaylistTrack, PlaylistWithTracks, VideoSelection};
use crate::db::music;
use crate::{Error, Result};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::debug;

/// Create a playlist for a user
pub async fn create(
    pool: &SqlitePool,
    user_id: &str,
    name: &str,
    description: Option<&str>,
    is_public: bool,
) -> Result<PlaylistWithTracks> {
    if user_id.trim().is_empty() || name.trim().is_empty() {
        return Err(Error::InvalidInput(
            "user_id and name are required".to_string(),
        ));
    }

    let result = sqlx::query(
        r#"
        INSERT INTO playlists (user_id, name, description, is_public)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(user_id)
    .bind(name)
    .bind(description)
    .bind(is_public)
    .execute(pool)
    .await?;

    let playlist_id = result.last_insert_rowid();
    debug!(playlist_id, user_id, "created playlist");

    load_with_tracks(pool, playlist_id).await
}

/// Load a playlist row by id
pub async fn load(pool: &SqlitePool, playlist_id: i64) -> Result<Option<Playlist>> {
    let row = sqlx::query(
        r#"
        SELECT id, user_id, name, description, is_public, is_fav, created_at, updated_at
        FROM playlists
        WHERE id = ?
        "#,
    )
    .bind(playlist_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(map_playlist_row))
}

/// Load a playlist with its tracks, or NotFound
pub async fn load_with_tracks(pool: &SqlitePool, playlist_id: i64) -> Result<PlaylistWithTracks> {
    let playlist = load(pool, playlist_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("playlist not found: {}", playlist_id)))?;
    let tracks = tracks_for(pool, playlist_id).await?;
    Ok(PlaylistWithTracks { playlist, tracks })
}

/// All playlists owned by a user, each with its tracks
pub async fn list_for_user(pool: &SqlitePool, user_id: &str) -> Result<Vec<PlaylistWithTracks>> {
    list_where(pool, user_id, false).await
}

/// Subset of a user's playlists with the favorite flag set
pub async fn list_favorites(pool: &SqlitePool, user_id: &str) -> Result<Vec<PlaylistWithTracks>> {
    list_where(pool, user_id, true).await
}

async fn list_where(
    pool: &SqlitePool,
    user_id: &str,
    favorites_only: bool,
) -> Result<Vec<PlaylistWithTracks>> {
    let sql = if favorites_only {
        r#"
        SELECT id, user_id, name, description, is_public, is_fav, created_at, updated_at
        FROM playlists
        WHERE user_id = ? AND is_fav = 1
        ORDER BY created_at DESC, id DESC
        "#
    } else {
        r#"
        SELECT id, user_id, name, description, is_public, is_fav, created_at, updated_at
        FROM playlists
        WHERE user_id = ?
        ORDER BY created_at DESC, id DESC
        "#
    };

    let rows = sqlx::query(sql).bind(user_id).fetch_all(pool).await?;

    let mut playlists = Vec::with_capacity(rows.len());
    for row in rows {
        let playlist = map_playlist_row(row);
        let tracks = tracks_for(pool, playlist.id).await?;
        playlists.push(PlaylistWithTracks { playlist, tracks });
    }

    Ok(playlists)
}

/// Add a track to a playlist.
///
/// Resolves or creates the owner's catalog row for the video, then inserts
/// a junction row at the next order position. A track already present
/// yields Conflict.
pub async fn add_track(
    pool: &SqlitePool,
    playlist_id: i64,
    caller: Option<&str>,
    track: &VideoSelection,
) -> Result<PlaylistWithTracks> {
    let playlist = load(pool, playlist_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("playlist not found: {}", playlist_id)))?;
    authorize_owner(caller, &playlist.user_id)?;

    let music = music::upsert_for_user(pool, &playlist.user_id, track).await?;

    let result = sqlx::query(
        r#"
        INSERT INTO playlist_entries (playlist_id, music_id, order_index)
        VALUES (
            ?, ?,
            (SELECT COALESCE(MAX(order_index) + 1, 0) FROM playlist_entries WHERE playlist_id = ?)
        )
        ON CONFLICT(playlist_id, music_id) DO NOTHING
        "#,
    )
    .bind(playlist_id)
    .bind(music.id)
    .bind(playlist_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::Conflict(format!(
            "track already in playlist: {}",
            track.video_id
        )));
    }
    debug!(playlist_id, music_id = music.id, "added track");

    load_with_tracks(pool, playlist_id).await
}

/// Remove a track from a playlist.
///
/// Deletes only the junction row; the catalog row stays even when it no
/// longer belongs to any playlist.
pub async fn remove_track(
    pool: &SqlitePool,
    playlist_id: i64,
    caller: Option<&str>,
    video_id: &str,
) -> Result<PlaylistWithTracks> {
    let playlist = load(pool, playlist_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("playlist not found: {}", playlist_id)))?;
    authorize_owner(caller, &playlist.user_id)?;

    let music = music::load_by_video(pool, &playlist.user_id, video_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("music not found: {}", video_id)))?;

    let result = sqlx::query(
        "DELETE FROM playlist_entries WHERE playlist_id = ? AND music_id = ?",
    )
    .bind(playlist_id)
    .bind(music.id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!(
            "track not in playlist: {}",
            video_id
        )));
    }
    debug!(playlist_id, music_id = music.id, "removed track");

    load_with_tracks(pool, playlist_id).await
}

/// Flip the favorite flag on a playlist
pub async fn toggle_favorite(
    pool: &SqlitePool,
    playlist_id: i64,
    caller: Option<&str>,
) -> Result<PlaylistWithTracks> {
    let playlist = load(pool, playlist_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("playlist not found: {}", playlist_id)))?;
    authorize_owner(caller, &playlist.user_id)?;

    sqlx::query(
        "UPDATE playlists SET is_fav = NOT is_fav, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
    )
    .bind(playlist_id)
    .execute(pool)
    .await?;

    load_with_tracks(pool, playlist_id).await
}

/// Hard-delete a playlist.
///
/// Junction rows go via the foreign-key cascade; shared catalog rows stay.
pub async fn delete(pool: &SqlitePool, playlist_id: i64, caller: Option<&str>) -> Result<()> {
    let playlist = load(pool, playlist_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("playlist not found: {}", playlist_id)))?;
    authorize_owner(caller, &playlist.user_id)?;

    sqlx::query("DELETE FROM playlists WHERE id = ?")
        .bind(playlist_id)
        .execute(pool)
        .await?;
    debug!(playlist_id, "deleted playlist");

    Ok(())
}

async fn tracks_for(pool: &SqlitePool, playlist_id: i64) -> Result<Vec<PlaylistTrack>> {
    let rows = sqlx::query(
        r#"
        SELECT m.id AS music_id, m.video_id, m.title, m.channel_title, m.thumbnail_url,
               m.source_url, m.is_fav, pe.added_at, pe.order_index
        FROM playlist_entries pe
        JOIN musics m ON m.id = pe.music_id
        WHERE pe.playlist_id = ?
        ORDER BY pe.order_index, pe.added_at
        "#,
    )
    .bind(playlist_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| PlaylistTrack {
            music_id: row.get("music_id"),
            video_id: row.get("video_id"),
            title: row.get("title"),
            channel_title: row.get("channel_title"),
            thumbnail_url: row.get("thumbnail_url"),
            source_url: row.get("source_url"),
            is_fav: row.get("is_fav"),
            added_at: row.get("added_at"),
            order_index: row.get("order_index"),
        })
        .collect())
}

fn map_playlist_row(row: SqliteRow) -> Playlist {
    Playlist {
        id: row.get("id"),
        user_id: row.get("user_id"),
        name: row.get("name"),
        description: row.get("description"),
        is_public: row.get("is_public"),
        is_fav: row.get("is_fav"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
