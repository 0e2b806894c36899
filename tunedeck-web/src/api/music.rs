//! Music catalog endpoints

use crate::api::auth::{Caller, MaybeCaller};
use crate::error::ApiResult;
use crate::AppState;
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use tunedeck_common::auth::authorize_owner;
use tunedeck_common::db::models::Music;
use tunedeck_common::db::music;

#[derive(Debug, Serialize)]
pub struct ToggleFavoriteResponse {
    pub video_id: String,
    pub is_fav: bool,
}

/// PUT /api/music/toggle-favorite/:video_id - Flip the caller's favorite flag
///
/// Operates on the caller's own catalog row, so an identity is required.
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Caller(claims): Caller,
    Path(video_id): Path<String>,
) -> ApiResult<Json<ToggleFavoriteResponse>> {
    let is_fav = music::toggle_favorite(&state.db, &claims.sub, &video_id).await?;
    Ok(Json(ToggleFavoriteResponse { video_id, is_fav }))
}

/// GET /api/music/history/:user_id - Most recently saved videos
pub async fn history(
    State(state): State<AppState>,
    caller: MaybeCaller,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<Music>>> {
    authorize_owner(caller.id(), &user_id)?;
    Ok(Json(
        music::list_search_history(&state.db, &user_id, music::DEFAULT_HISTORY_LIMIT).await?,
    ))
}

/// GET /api/music/favorites/:user_id - Favorited catalog rows
pub async fn favorites(
    State(state): State<AppState>,
    caller: MaybeCaller,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<Music>>> {
    authorize_owner(caller.id(), &user_id)?;
    Ok(Json(music::list_favorites(&state.db, &user_id).await?))
}
