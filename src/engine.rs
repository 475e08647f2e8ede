// Catalog engine - the one owner of catalog, view, filter and feed state
// The UI reads snapshots from here and sends intents back; nothing else mutates state

use chrono::{DateTime, Utc};
use rand::rngs::ThreadRng;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::catalog::{
    categorize, CatalogStore, CatalogView, CategoryEntry, FilterController, MediaDescriptor, MediaRef,
    UnthumbnailedSet,
};
use crate::config::Config;
use crate::diagnostics::BadVideosBrowser;
use crate::feed::{
    ExtensionGuard, ExtensionOutcome, FeedEntry, FeedGenerator, Recommendation, RecommendationSampler,
    DEFAULT_RECOMMENDATIONS,
};
use crate::random::{thread_source, RandomSource};

/// Knobs the engine needs out of the full config
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub extension_cooldown: Duration,
    pub max_feed_entries: Option<usize>,
    pub recommendations: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            extension_cooldown: Duration::from_millis(500),
            max_feed_entries: None,
            recommendations: DEFAULT_RECOMMENDATIONS,
        }
    }
}

impl From<&Config> for EngineSettings {
    fn from(config: &Config) -> Self {
        Self {
            extension_cooldown: config.feed.extension_cooldown(),
            max_feed_entries: config.feed.max_entries,
            recommendations: config.recommendations.count,
        }
    }
}

/// Counts for the header badge and the probe report
#[derive(Debug, Clone, Serialize)]
pub struct CatalogSummary {
    pub total: usize,
    pub displayable: usize,
    pub undisplayable: usize,
    pub categories: usize,
    pub active_category: String,
    pub feed_len: usize,
    pub feed_extensions: usize,
    pub generation: u64,
    pub loaded_at: Option<DateTime<Utc>>,
}

impl CatalogSummary {
    /// Main count line; the empty catalog gets an explicit message
    pub fn headline(&self) -> String {
        if self.total == 0 {
            "No videos found".to_string()
        } else {
            format!("{} videos available", self.displayable)
        }
    }

    /// Only present when something is missing a thumbnail
    pub fn bad_videos_badge(&self) -> Option<String> {
        (self.undisplayable > 0).then(|| format!("BAD VIDEOS ({})", self.undisplayable))
    }
}

pub struct CatalogEngine<R: RandomSource = ThreadRng> {
    store: CatalogStore,
    view: CatalogView,
    unthumbnailed: UnthumbnailedSet,
    filter: FilterController,
    feed: FeedGenerator,
    guard: ExtensionGuard,
    sampler: RecommendationSampler,
    rng: R,
}

impl CatalogEngine<ThreadRng> {
    pub fn new(settings: EngineSettings) -> Self {
        Self::with_random(settings, thread_source())
    }
}

impl<R: RandomSource> CatalogEngine<R> {
    /// Build an engine around a specific randomness source
    pub fn with_random(settings: EngineSettings, rng: R) -> Self {
        Self {
            store: CatalogStore::new(),
            view: CatalogView::default(),
            unthumbnailed: UnthumbnailedSet::default(),
            filter: FilterController::new(),
            feed: FeedGenerator::new(settings.max_feed_entries),
            guard: ExtensionGuard::new(settings.extension_cooldown),
            sampler: RecommendationSampler::new(settings.recommendations),
            rng,
        }
    }

    /// Replace the catalog and rebuild everything derived from it.
    ///
    /// A selection that no longer exists falls back to `"all"`; the feed
    /// starts over from its first page.
    pub fn load(&mut self, descriptors: Vec<MediaDescriptor>) {
        self.store.load(descriptors);
        self.view = categorize(self.store.get());
        self.unthumbnailed = UnthumbnailedSet::from_catalog(self.store.get());

        if self.filter.revalidate(&self.view) {
            info!("Selected category disappeared, showing all");
        }
        self.reset_feed();
    }

    /// Switch category. Re-selecting the current one still resets the feed.
    pub fn select(&mut self, category: &str) -> &str {
        self.filter.select(&self.view, category);
        self.reset_feed();
        self.filter.active()
    }

    fn reset_feed(&mut self) {
        self.guard.release();
        let backing = self.filter.active_subset(&self.view);
        self.feed.render_initial(backing, &mut self.rng);
    }

    /// Grow the feed by one shuffled pass, ignoring the in-flight guard
    pub fn extend(&mut self) -> ExtensionOutcome {
        let backing = self.filter.active_subset(&self.view);
        self.feed.extend(backing, &mut self.rng)
    }

    /// Scroll-boundary signal from the UI. At most one extension per cooldown window.
    pub fn on_boundary_reached(&mut self, now: Instant) -> ExtensionOutcome {
        if self.store.is_empty() {
            return ExtensionOutcome::Empty;
        }
        if !self.guard.try_begin(now) {
            return ExtensionOutcome::Dropped;
        }
        let outcome = self.extend();
        debug!("Boundary reached -> {:?}", outcome);
        outcome
    }

    /// Fresh recommendations for the item now playing
    pub fn recommendations(&mut self, playing: &str) -> Vec<Recommendation> {
        self.sampler.recommend(self.view.all(), playing, &mut self.rng)
    }

    /// Raw uniform sample of up to `k` displayable items, excluding `excluding`
    pub fn sample(&mut self, excluding: &str, k: usize) -> Vec<MediaRef> {
        self.sampler.sample(self.view.all(), excluding, k, &mut self.rng)
    }

    /// Titled, folder-navigable listing of the items the grid leaves out
    pub fn bad_videos(&mut self) -> BadVideosBrowser {
        BadVideosBrowser::open(&self.unthumbnailed, &mut self.rng)
    }

    pub fn catalog(&self) -> &[MediaRef] {
        self.store.get()
    }

    pub fn view(&self) -> &CatalogView {
        &self.view
    }

    pub fn unthumbnailed(&self) -> &UnthumbnailedSet {
        &self.unthumbnailed
    }

    pub fn active_category(&self) -> &str {
        self.filter.active()
    }

    pub fn active_subset(&self) -> &[MediaRef] {
        self.filter.active_subset(&self.view)
    }

    pub fn feed(&self) -> &[FeedEntry] {
        self.feed.entries()
    }

    /// `None` when there are fewer than two folders to pick from
    pub fn category_nav(&self) -> Option<Vec<CategoryEntry>> {
        self.view.navigation()
    }

    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            total: self.store.len(),
            displayable: self.view.all().len(),
            undisplayable: self.unthumbnailed.len(),
            categories: self.view.key_count() - 1,
            active_category: self.filter.active().to_string(),
            feed_len: self.feed.len(),
            feed_extensions: self.feed.extensions(),
            generation: self.store.generation(),
            loaded_at: self.store.loaded_at(),
        }
    }
}
