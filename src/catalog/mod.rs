// Catalog - what the server told us exists, and how it groups up
// Store holds the raw list, categorizer derives the folder view, filter picks a slice

pub mod categorizer; // folder grouping + unthumbnailed diagnostics
pub mod filter;      // active category tracking
pub mod store;       // fetched descriptor list

pub use categorizer::{categorize, category_of, CatalogView, CategoryEntry, UnthumbnailedSet};
pub use filter::FilterController;
pub use store::CatalogStore;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Reserved key for the synthetic group holding every displayable item
pub const ALL_CATEGORY: &str = "all";

/// Category used when a path has no parent folder segment
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Shared handle to a descriptor. The feed repeats items, so we never copy them.
pub type MediaRef = Arc<MediaDescriptor>;

/// One media item as reported by the server. Identity is `video_path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaDescriptor {
    pub video_path: String,
    #[serde(default)]
    pub thumb_path: Option<String>,
    #[serde(default)]
    pub has_thumb: bool,
    /// File stem the server derived from the video name, if it sent one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl MediaDescriptor {
    pub fn new(video_path: impl Into<String>, thumb_path: Option<&str>) -> Self {
        let thumb_path = thumb_path.map(str::to_string);
        Self {
            video_path: video_path.into(),
            has_thumb: thumb_path.is_some(),
            thumb_path,
            name: None,
        }
    }

    /// Eligible for the main grid: flagged as thumbnailed AND has a usable thumb path
    pub fn is_displayable(&self) -> bool {
        self.has_thumb && self.thumb_path.as_deref().is_some_and(|p| !p.is_empty())
    }

    /// Folder-derived category label
    pub fn category(&self) -> &str {
        category_of(&self.video_path)
    }

    /// Last path segment, used where a human-readable file name helps
    pub fn file_name(&self) -> &str {
        self.video_path.rsplit('/').next().unwrap_or(&self.video_path)
    }
}
