//! Database models

use serde::{Deserialize, Serialize};

/// Locally mirrored identity-provider user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// One (video, owning user) pairing the user has encountered
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Music {
    pub id: i64,
    pub video_id: String,
    pub user_id: String,
    pub title: String,
    pub channel_title: Option<String>,
    pub thumbnail_url: Option<String>,
    pub source_url: Option<String>,
    pub is_fav: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Named collection owned by one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub is_fav: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Playlist together with its tracks, joined through the junction
#[derive(Debug, Clone, Serialize)]
pub struct PlaylistWithTracks {
    #[serde(flatten)]
    pub playlist: Playlist,
    pub tracks: Vec<PlaylistTrack>,
}

/// One track of a playlist: the music row plus its junction metadata
#[derive(Debug, Clone, Serialize)]
pub struct PlaylistTrack {
    pub music_id: i64,
    pub video_id: String,
    pub title: String,
    pub channel_title: Option<String>,
    pub thumbnail_url: Option<String>,
    pub source_url: Option<String>,
    pub is_fav: bool,
    pub added_at: String,
    pub order_index: i64,
}

/// Flat per-user bookmark of a video, independent of playlist membership
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Favorite {
    pub id: i64,
    pub user_id: String,
    pub title: String,
    pub channel_title: Option<String>,
    pub thumbnail_url: Option<String>,
    pub video_id: String,
    pub source_url: Option<String>,
    pub created_at: String,
}

/// Video metadata as selected by the client (a saved search result)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoSelection {
    pub video_id: String,
    pub title: String,
    pub channel_title: Option<String>,
    pub thumbnail_url: Option<String>,
    pub source_url: Option<String>,
}
