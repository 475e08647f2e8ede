// LocalTube Library - catalog engine behind the terminal video browser
// Everything except `ui` is headless and can be driven from tests or the probe binary

pub mod api;      // media server client + listing decoder
pub mod catalog;  // descriptors, categories, active filter
pub mod config;   // settings and preferences
pub mod diagnostics; // bad-videos browser
pub mod engine;   // owns all catalog/feed state
pub mod feed;     // infinite feed, titles, recommendations
pub mod logging;  // tracing setup
pub mod random;   // injectable randomness

#[cfg(feature = "tui")]
pub mod ui;       // terminal interface

// Export the stuff other modules actually use
pub use api::{FetchError, MediaClient};
pub use catalog::{CatalogView, MediaDescriptor, MediaRef};
pub use config::Config;
pub use diagnostics::{BadVideo, BadVideosBrowser};
pub use engine::{CatalogEngine, CatalogSummary, EngineSettings};
pub use feed::{ExtensionOutcome, FeedEntry, Recommendation};
