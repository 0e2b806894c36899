//! Video search endpoints
//!
//! Thin pass-through to the search provider; no identity needed.

use crate::error::ApiResult;
use crate::search::{VideoDetail, VideoSummary};
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default, alias = "maxResults")]
    pub max_results: Option<u32>,
}

/// GET /api/search?q=&max_results= - Search the provider for music videos
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Vec<VideoSummary>>> {
    let results = state
        .search
        .search(params.q.as_deref().unwrap_or(""), params.max_results)
        .await?;
    Ok(Json(results))
}

/// GET /api/search/video/:video_id - Full metadata for one video
pub async fn video_detail(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> ApiResult<Json<VideoDetail>> {
    let detail = state.search.video_detail(&video_id).await?;
    Ok(Json(detail))
}
