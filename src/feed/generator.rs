use tracing::{debug, info};

use super::titles::generate_title;
use crate::catalog::MediaRef;
use crate::random::{shuffled, RandomSource};

/// One card in the grid. The same descriptor can show up many times.
#[derive(Debug, Clone)]
pub struct FeedEntry {
    pub media: MediaRef,
    /// 1-based position in the feed, stable once assigned
    pub display_index: usize,
    pub title: String,
}

/// What a request to grow the feed actually did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionOutcome {
    /// Appended this many entries
    Appended(usize),
    /// Backing list was empty, nothing to recycle
    Empty,
    /// Would have grown past the configured cap
    Capped,
    /// Another extension was still in flight
    Dropped,
}

impl ExtensionOutcome {
    pub fn appended(&self) -> usize {
        match self {
            ExtensionOutcome::Appended(count) => *count,
            _ => 0,
        }
    }
}

/// Endless feed over a finite backing list.
///
/// The first page is the backing list in catalog order. Every extension
/// appends a freshly shuffled copy of the whole backing list, so small
/// catalogs repeat instead of running out.
#[derive(Debug, Default)]
pub struct FeedGenerator {
    entries: Vec<FeedEntry>,
    max_entries: Option<usize>,
    extensions: usize,
}

impl FeedGenerator {
    pub fn new(max_entries: Option<usize>) -> Self {
        Self {
            entries: Vec::new(),
            max_entries,
            extensions: 0,
        }
    }

    /// Empty the feed. Display indices start over at 1.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.extensions = 0;
    }

    /// Reset and lay out `backing` in its natural order
    pub fn render_initial<R: RandomSource + ?Sized>(&mut self, backing: &[MediaRef], rng: &mut R) {
        self.reset();
        self.append(backing.iter().cloned(), rng);
        info!("Feed initialised with {} entries", self.entries.len());
    }

    /// Append one shuffled pass over `backing`.
    ///
    /// Always the full backing list, never the already-materialized feed.
    pub fn extend<R: RandomSource + ?Sized>(&mut self, backing: &[MediaRef], rng: &mut R) -> ExtensionOutcome {
        if backing.is_empty() {
            debug!("Extension skipped, backing list empty");
            return ExtensionOutcome::Empty;
        }

        if let Some(cap) = self.max_entries {
            if self.entries.len() + backing.len() > cap {
                debug!("Extension refused, feed would exceed cap of {}", cap);
                return ExtensionOutcome::Capped;
            }
        }

        let batch = shuffled(backing, rng);
        let appended = self.append(batch.into_iter(), rng);
        self.extensions += 1;

        debug!(
            "Feed extension #{} appended {} entries (total {})",
            self.extensions,
            appended,
            self.entries.len()
        );
        ExtensionOutcome::Appended(appended)
    }

    fn append<R, I>(&mut self, media: I, rng: &mut R) -> usize
    where
        R: RandomSource + ?Sized,
        I: Iterator<Item = MediaRef>,
    {
        let before = self.entries.len();
        for media in media {
            let display_index = self.entries.len() + 1;
            self.entries.push(FeedEntry {
                media,
                display_index,
                title: generate_title(rng),
            });
        }
        self.entries.len() - before
    }

    pub fn entries(&self) -> &[FeedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Extensions since the last reset
    pub fn extensions(&self) -> usize {
        self.extensions
    }
}
