use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::{MediaDescriptor, MediaRef};
use std::sync::Arc;

/// The fetched catalog. Replaced wholesale on every load, never patched.
#[derive(Debug, Default)]
pub struct CatalogStore {
    items: Vec<MediaRef>,
    loaded_at: Option<DateTime<Utc>>,
    generation: u64,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a new catalog. Whatever was there before is dropped.
    pub fn load(&mut self, descriptors: Vec<MediaDescriptor>) {
        let previous = self.items.len();
        self.items = descriptors.into_iter().map(Arc::new).collect();
        self.loaded_at = Some(Utc::now());
        self.generation += 1;

        debug!("Catalog replaced: {} -> {} descriptors", previous, self.items.len());
        info!("Loaded catalog generation {} ({} items)", self.generation, self.items.len());
    }

    /// Current catalog; empty if nothing was ever loaded or the fetch failed
    pub fn get(&self) -> &[MediaRef] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    /// Bumped on every load so views can tell they are stale
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
