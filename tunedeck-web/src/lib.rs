//! tunedeck-web library - HTTP service for the Tunedeck playlist manager
//!
//! Request routing, caller-identity extraction, and response shaping over
//! the stores in tunedeck-common.

use axum::Router;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod search;
pub mod token;

use search::SearchClient;
use token::TokenVerifier;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Video-search provider client
    pub search: SearchClient,
    /// Bearer credential verifier
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, search: SearchClient, verifier: TokenVerifier) -> Self {
        Self {
            db,
            search,
            verifier: Arc::new(verifier),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{delete, get, post, put};

    Router::new()
        // Health endpoint
        .route("/health", get(api::health::health))
        // Video search gateway
        .route("/api/search", get(api::search::search))
        .route("/api/search/video/:video_id", get(api::search::video_detail))
        // Caller profile
        .route("/api/user", get(api::users::profile))
        // Playlists
        .route("/api/playlists", post(api::playlists::create))
        .route("/api/playlists/user/:user_id", get(api::playlists::list_for_user))
        .route(
            "/api/playlists/user/:user_id/favorites",
            get(api::playlists::list_favorites),
        )
        .route("/api/playlists/:id/add-music", put(api::playlists::add_track))
        .route("/api/playlists/:id/remove-music", put(api::playlists::remove_track))
        .route(
            "/api/playlists/:id/toggle-favorite",
            put(api::playlists::toggle_favorite),
        )
        .route("/api/playlists/:id", delete(api::playlists::delete))
        // Favorites
        .route("/api/favorites", post(api::favorites::add))
        .route("/api/favorites/user/:user_id", get(api::favorites::list_for_user))
        .route("/api/favorites/:id", delete(api::favorites::remove))
        // Music catalog
        .route(
            "/api/music/toggle-favorite/:video_id",
            put(api::music::toggle_favorite),
        )
        .route("/api/music/history/:user_id", get(api::music::history))
        .route("/api/music/favorites/:user_id", get(api::music::favorites))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // Enable CORS for the SPA client
        .layer(CorsLayer::permissive())
}
