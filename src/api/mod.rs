// Media server client - one GET for the listing, plus URL building for assets
// Anything that goes wrong here ends up as an empty catalog, never a crash

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalog::MediaDescriptor;

/// Path of the listing endpoint relative to the server base URL
pub const MEDIA_ENDPOINT: &str = "api/media";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("server answered {status} for {url}")]
    Status { url: String, status: StatusCode },
    #[error("could not decode media listing: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Listing body as the server sends it. Every field is optional on the wire.
#[derive(Debug, Default, Deserialize)]
struct MediaListing {
    #[serde(default)]
    media_files: Option<Vec<WireMediaFile>>,
    #[serde(default)]
    total_videos: Option<usize>,
    #[serde(default)]
    videos_with_thumbs: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct WireMediaFile {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    video_path: Option<String>,
    #[serde(default)]
    thumb_path: Option<String>,
    #[serde(default)]
    has_thumb: Option<bool>,
}

impl WireMediaFile {
    /// Entries without a video path break the identity contract; drop them
    fn into_descriptor(self) -> Option<MediaDescriptor> {
        let video_path = self.video_path.filter(|p| !p.is_empty())?;
        Some(MediaDescriptor {
            video_path,
            thumb_path: self.thumb_path,
            has_thumb: self.has_thumb.unwrap_or(false),
            name: self.name,
        })
    }
}

/// Decode a listing body into descriptors.
///
/// A missing or `null` `media_files` is an empty catalog, not an error.
pub fn parse_media_listing(body: &str) -> Result<Vec<MediaDescriptor>, FetchError> {
    let listing: MediaListing = serde_json::from_str(body)?;

    if let (Some(total), Some(with_thumbs)) = (listing.total_videos, listing.videos_with_thumbs) {
        debug!("Server reports {} videos, {} with thumbnails", total, with_thumbs);
    }

    let raw = listing.media_files.unwrap_or_default();
    let raw_count = raw.len();
    let descriptors: Vec<MediaDescriptor> = raw
        .into_iter()
        .filter_map(WireMediaFile::into_descriptor)
        .collect();

    if descriptors.len() < raw_count {
        debug!("Dropped {} listing entries without video_path", raw_count - descriptors.len());
    }
    Ok(descriptors)
}

/// `{base}/{path}` with exactly one slash between them
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// HTTP client bound to one media server
#[derive(Debug, Clone)]
pub struct MediaClient {
    http: Client,
    base_url: String,
}

impl MediaClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn listing_url(&self) -> String {
        join_url(&self.base_url, MEDIA_ENDPOINT)
    }

    /// Absolute URL for a server-relative thumb or video path
    pub fn asset_url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// Fetch and decode the listing, surfacing every failure
    pub async fn fetch_catalog(&self) -> Result<Vec<MediaDescriptor>, FetchError> {
        let url = self.listing_url();
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Transport { url: url.clone(), source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url, status });
        }

        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Transport { url: url.clone(), source })?;

        let descriptors = parse_media_listing(&body)?;
        info!("Fetched {} media descriptors from {}", descriptors.len(), url);
        Ok(descriptors)
    }

    /// Fetch, degrading any failure to an empty catalog
    pub async fn fetch_or_empty(&self) -> Vec<MediaDescriptor> {
        match self.fetch_catalog().await {
            Ok(descriptors) => descriptors,
            Err(e) => {
                warn!("Media fetch failed, showing empty catalog: {}", e);
                Vec::new()
            }
        }
    }
}
