// Feed - turns a finite category into a grid that never runs dry,
// plus the random "up next" list shown next to the player

pub mod generator; // initial page + shuffled recycling extensions
pub mod guard;     // one-extension-at-a-time cooldown
pub mod sampler;   // sidebar recommendations
pub mod titles;    // made-up card titles

pub use generator::{ExtensionOutcome, FeedEntry, FeedGenerator};
pub use guard::ExtensionGuard;
pub use sampler::{Recommendation, RecommendationSampler, DEFAULT_RECOMMENDATIONS};
pub use titles::generate_title;
