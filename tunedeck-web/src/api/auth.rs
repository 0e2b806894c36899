//! Caller-identity extractors
//!
//! The caller id is derived once per request from the bearer credential and
//! attached before any store operation runs. A present-but-invalid
//! credential is rejected even on routes that tolerate anonymous callers.

use crate::error::ApiError;
use crate::token::VerifiedClaims;
use crate::AppState;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tunedeck_common::db::users;
use tunedeck_common::Error;

/// Verified caller identity; rejects the request with 401 when absent
pub struct Caller(pub VerifiedClaims);

/// Optional caller identity for routes that tolerate anonymous requests
pub struct MaybeCaller(pub Option<VerifiedClaims>);

impl MaybeCaller {
    /// The caller's user id, when a credential was presented
    pub fn id(&self) -> Option<&str> {
        self.0.as_ref().map(|claims| claims.sub.as_str())
    }
}

fn bearer_token(parts: &Parts) -> Result<Option<&str>, Error> {
    let Some(value) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value
        .to_str()
        .map_err(|_| Error::Unauthorized("malformed Authorization header".to_string()))?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| Error::Unauthorized("expected a Bearer credential".to_string()))?;
    Ok(Some(token))
}

async fn verified_caller(
    parts: &Parts,
    state: &AppState,
) -> Result<Option<VerifiedClaims>, Error> {
    let Some(token) = bearer_token(parts)? else {
        return Ok(None);
    };
    let claims = state.verifier.verify(token)?;

    // Users are mirrored locally on their first authenticated action
    users::upsert_user(
        &state.db,
        &claims.sub,
        claims.preferred_username.as_deref(),
        claims.email.as_deref(),
    )
    .await?;

    Ok(Some(claims))
}

#[async_trait]
impl FromRequestParts<AppState> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = verified_caller(parts, state)
            .await?
            .ok_or_else(|| Error::Unauthorized("caller identity required".to_string()))?;
        Ok(Caller(claims))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for MaybeCaller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeCaller(verified_caller(parts, state).await?))
    }
}
