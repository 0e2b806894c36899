//! Video-search provider client
//!
//! Thin pass-through to the external video-search API: a text query in,
//! a ranked list of video summaries out, in upstream order. No pagination,
//! ranking, or caching here.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use tunedeck_common::config::SearchConfig;
use tunedeck_common::{Error, Result};

/// Default number of results when the caller does not specify one
pub const DEFAULT_MAX_RESULTS: u32 = 10;

/// Provider category id for music videos
const MUSIC_CATEGORY_ID: &str = "10";

/// One search result as returned to the client
#[derive(Debug, Clone, Serialize)]
pub struct VideoSummary {
    pub video_id: String,
    pub title: String,
    pub channel_title: Option<String>,
    pub thumbnail_url: Option<String>,
    pub source_url: String,
}

/// Full metadata for a single video
#[derive(Debug, Clone, Serialize)]
pub struct VideoDetail {
    pub video_id: String,
    pub title: String,
    pub channel_title: Option<String>,
    pub thumbnail_url: Option<String>,
    pub source_url: String,
    pub duration: Option<String>,
    pub description: Option<String>,
}

/// Client for the external video-search provider
#[derive(Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SearchClient {
    /// Create a new client from configuration
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Search the provider for music videos matching `query`.
    ///
    /// Results come back in upstream order, capped at `max_results`
    /// (default 10). An empty query is rejected before any network call.
    pub async fn search(
        &self,
        query: &str,
        max_results: Option<u32>,
    ) -> Result<Vec<VideoSummary>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::InvalidInput("search query is required".to_string()));
        }
        let max_results = max_results.unwrap_or(DEFAULT_MAX_RESULTS);

        debug!(query, max_results, "searching video provider");
        let url = format!("{}/search", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("type", "video"),
                ("videoCategoryId", MUSIC_CATEGORY_ID),
                ("order", "relevance"),
                ("maxResults", &max_results.to_string()),
                ("q", query),
                ("key", &self.api_key),
            ])
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("search request failed: {}", e)))?;

        let body: SearchResponse = read_provider_json(response).await?;

        Ok(body
            .items
            .into_iter()
            .filter_map(|item| {
                let video_id = item.id.video_id?;
                Some(VideoSummary {
                    source_url: watch_url(&video_id),
                    video_id,
                    title: item.snippet.title,
                    channel_title: item.snippet.channel_title,
                    thumbnail_url: item.snippet.thumbnails.best_url(),
                })
            })
            .take(max_results as usize)
            .collect())
    }

    /// Fetch full metadata for one video by its external id
    pub async fn video_detail(&self, video_id: &str) -> Result<VideoDetail> {
        let video_id = video_id.trim();
        if video_id.is_empty() {
            return Err(Error::InvalidInput("video id is required".to_string()));
        }

        let url = format!("{}/videos", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("part", "snippet,contentDetails"),
                ("id", video_id),
                ("key", &self.api_key),
            ])
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("video lookup failed: {}", e)))?;

        let body: VideoListResponse = read_provider_json(response).await?;

        let item = body
            .items
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(format!("video not found: {}", video_id)))?;

        Ok(VideoDetail {
            source_url: watch_url(&item.id),
            video_id: item.id,
            title: item.snippet.title,
            channel_title: item.snippet.channel_title,
            thumbnail_url: item.snippet.thumbnails.best_url(),
            duration: item.content_details.and_then(|d| d.duration),
            description: item.snippet.description,
        })
    }
}

fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

/// Decode a provider response, surfacing provider error messages verbatim
async fn read_provider_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| Error::Upstream(format!("failed to read provider response: {}", e)))?;

    if !status.is_success() {
        // Provider error bodies carry {"error": {"message": ...}}
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| {
                v.get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(Value::as_str)
                    .map(String::from)
            })
            .unwrap_or(body);
        return Err(Error::Upstream(format!(
            "search provider returned {}: {}",
            status, message
        )));
    }

    serde_json::from_str(&body)
        .map_err(|e| Error::Upstream(format!("unexpected provider response: {}", e)))
}

// Provider wire types

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    id: String,
    snippet: Snippet,
    #[serde(rename = "contentDetails")]
    content_details: Option<ContentDetails>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: String,
    #[serde(rename = "channelTitle")]
    channel_title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    medium: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

impl Thumbnails {
    /// Medium thumbnail when available, otherwise the default one
    fn best_url(self) -> Option<String> {
        self.medium.or(self.default).map(|t| t.url)
    }
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ContentDetails {
    duration: Option<String>,
}
