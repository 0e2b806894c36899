//! HTTP API handlers for tunedeck-web

pub mod auth;
pub mod favorites;
pub mod health;
pub mod music;
pub mod playlists;
pub mod search;
pub mod users;

use serde::Serialize;

/// Simple confirmation body for delete endpoints
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
