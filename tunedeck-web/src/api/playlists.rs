//! Playlist endpoints
//!
//! Ownership is checked against the caller identity before any mutation;
//! anonymous requests pass the guard (trust boundary documented in
//! DESIGN.md).

use crate::api::auth::MaybeCaller;
use crate::api::MessageResponse;
use crate::error::ApiResult;
use crate::AppState;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use tracing::info;
use tunedeck_common::auth::authorize_owner;
use tunedeck_common::db::models::{PlaylistWithTracks, VideoSelection};
use tunedeck_common::db::playlists;
use tunedeck_common::Error;

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_public: bool,
}

#[derive(Debug, Deserialize)]
pub struct AddTrackRequest {
    #[serde(default, alias = "videoId")]
    pub video_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "channelTitle")]
    pub channel_title: Option<String>,
    #[serde(default, alias = "thumbnail")]
    pub thumbnail_url: Option<String>,
    #[serde(default, alias = "youtubeUrl")]
    pub source_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RemoveTrackRequest {
    #[serde(default, alias = "videoId")]
    pub video_id: Option<String>,
}

/// POST /api/playlists - Create a playlist
pub async fn create(
    State(state): State<AppState>,
    caller: MaybeCaller,
    Json(req): Json<CreatePlaylistRequest>,
) -> ApiResult<Json<PlaylistWithTracks>> {
    let user_id = req.user_id.unwrap_or_default();
    let name = req.name.unwrap_or_default();
    if user_id.trim().is_empty() || name.trim().is_empty() {
        return Err(Error::InvalidInput("user_id and name are required".to_string()).into());
    }
    authorize_owner(caller.id(), &user_id)?;

    let playlist = playlists::create(
        &state.db,
        &user_id,
        &name,
        req.description.as_deref(),
        req.is_public,
    )
    .await?;
    info!(playlist_id = playlist.playlist.id, "playlist created");

    Ok(Json(playlist))
}

/// GET /api/playlists/user/:user_id - All playlists owned by a user
pub async fn list_for_user(
    State(state): State<AppState>,
    caller: MaybeCaller,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<PlaylistWithTracks>>> {
    authorize_owner(caller.id(), &user_id)?;
    Ok(Json(playlists::list_for_user(&state.db, &user_id).await?))
}

/// GET /api/playlists/user/:user_id/favorites - Favorited playlists
pub async fn list_favorites(
    State(state): State<AppState>,
    caller: MaybeCaller,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<PlaylistWithTracks>>> {
    authorize_owner(caller.id(), &user_id)?;
    Ok(Json(playlists::list_favorites(&state.db, &user_id).await?))
}

/// PUT /api/playlists/:id/add-music - Append a track
pub async fn add_track(
    State(state): State<AppState>,
    caller: MaybeCaller,
    Path(playlist_id): Path<i64>,
    Json(req): Json<AddTrackRequest>,
) -> ApiResult<Json<PlaylistWithTracks>> {
    let video_id = req.video_id.unwrap_or_default();
    let title = req.title.unwrap_or_default();
    if video_id.trim().is_empty() || title.trim().is_empty() {
        return Err(Error::InvalidInput("video_id and title are required".to_string()).into());
    }

    let track = VideoSelection {
        video_id,
        title,
        channel_title: req.channel_title,
        thumbnail_url: req.thumbnail_url,
        source_url: req.source_url,
    };
    Ok(Json(
        playlists::add_track(&state.db, playlist_id, caller.id(), &track).await?,
    ))
}

/// PUT /api/playlists/:id/remove-music - Remove a track
pub async fn remove_track(
    State(state): State<AppState>,
    caller: MaybeCaller,
    Path(playlist_id): Path<i64>,
    Json(req): Json<RemoveTrackRequest>,
) -> ApiResult<Json<PlaylistWithTracks>> {
    let video_id = req.video_id.unwrap_or_default();
    if video_id.trim().is_empty() {
        return Err(Error::InvalidInput("video_id is required".to_string()).into());
    }

    Ok(Json(
        playlists::remove_track(&state.db, playlist_id, caller.id(), &video_id).await?,
    ))
}

/// PUT /api/playlists/:id/toggle-favorite - Flip the favorite flag
pub async fn toggle_favorite(
    State(state): State<AppState>,
    caller: MaybeCaller,
    Path(playlist_id): Path<i64>,
) -> ApiResult<Json<PlaylistWithTracks>> {
    Ok(Json(
        playlists::toggle_favorite(&state.db, playlist_id, caller.id()).await?,
    ))
}

/// DELETE /api/playlists/:id - Hard-delete a playlist
pub async fn delete(
    State(state): State<AppState>,
    caller: MaybeCaller,
    Path(playlist_id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    playlists::delete(&state.db, playlist_id, caller.id()).await?;
    info!(playlist_id, "playlist deleted");
    Ok(Json(MessageResponse::new("playlist deleted")))
}
