//! Caller profile endpoint

use crate::api::auth::Caller;
use crate::error::ApiResult;
use crate::AppState;
use axum::extract::State;
use axum::Json;
use tunedeck_common::db::models::User;
use tunedeck_common::db::users;
use tunedeck_common::Error;

/// GET /api/user - Profile of the authenticated caller
pub async fn profile(
    State(state): State<AppState>,
    Caller(claims): Caller,
) -> ApiResult<Json<User>> {
    // The extractor mirrored the user, so the row exists
    let user = users::load_user(&state.db, &claims.sub)
        .await?
        .ok_or_else(|| Error::Internal(format!("user mirror missing: {}", claims.sub)))?;
    Ok(Json(user))
}
