//! Favorites endpoints

use crate::api::auth::MaybeCaller;
use crate::api::MessageResponse;
use crate::error::ApiResult;
use crate::AppState;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use tunedeck_common::auth::authorize_owner;
use tunedeck_common::db::favorites;
use tunedeck_common::db::models::{Favorite, VideoSelection};
use tunedeck_common::Error;

#[derive(Debug, Deserialize)]
pub struct AddFavoriteRequest {
    #[serde(default)]
    pub user_id: Option<String>,
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

/// POST /api/favorites - Bookmark a video
pub async fn add(
    State(state): State<AppState>,
    caller: MaybeCaller,
    Json(req): Json<AddFavoriteRequest>,
) -> ApiResult<Json<Favorite>> {
    let user_id = req.user_id.unwrap_or_default();
    let video_id = req.video_id.unwrap_or_default();
    let title = req.title.unwrap_or_default();
    if user_id.trim().is_empty() || video_id.trim().is_empty() || title.trim().is_empty() {
        return Err(
            Error::InvalidInput("user_id, video_id and title are required".to_string()).into(),
        );
    }
    authorize_owner(caller.id(), &user_id)?;

    let video = VideoSelection {
        video_id,
        title,
        channel_title: req.channel_title,
        thumbnail_url: req.thumbnail_url,
        source_url: req.source_url,
    };
    Ok(Json(favorites::add(&state.db, &user_id, &video).await?))
}

/// GET /api/favorites/user/:user_id - All bookmarks for a user
pub async fn list_for_user(
    State(state): State<AppState>,
    caller: MaybeCaller,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<Favorite>>> {
    authorize_owner(caller.id(), &user_id)?;
    Ok(Json(favorites::list_for_user(&state.db, &user_id).await?))
}

/// DELETE /api/favorites/:id - Remove a bookmark
pub async fn remove(
    State(state): State<AppState>,
    caller: MaybeCaller,
    Path(favorite_id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    favorites::remove(&state.db, favorite_id, caller.id()).await?;
    Ok(Json(MessageResponse::new("favorite removed")))
}
