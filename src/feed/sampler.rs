use tracing::debug;

use super::titles::generate_title;
use crate::catalog::MediaRef;
use crate::random::{shuffle, RandomSource};

/// Sidebar size used when nothing is configured
pub const DEFAULT_RECOMMENDATIONS: usize = 20;

/// A recommended item with its own throwaway title
#[derive(Debug, Clone)]
pub struct Recommendation {
    pub media: MediaRef,
    pub title: String,
}

/// Random "up next" picks for the sidebar.
///
/// Nothing is cached: every playback change draws a new sample.
#[derive(Debug, Clone)]
pub struct RecommendationSampler {
    count: usize,
}

impl Default for RecommendationSampler {
    fn default() -> Self {
        Self::new(DEFAULT_RECOMMENDATIONS)
    }
}

impl RecommendationSampler {
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Uniform sample without replacement of up to `k` items from `pool`,
    /// skipping every entry whose path equals `excluding`.
    pub fn sample<R: RandomSource + ?Sized>(
        &self,
        pool: &[MediaRef],
        excluding: &str,
        k: usize,
        rng: &mut R,
    ) -> Vec<MediaRef> {
        let mut eligible: Vec<MediaRef> = pool
            .iter()
            .filter(|m| m.video_path != excluding)
            .cloned()
            .collect();

        shuffle(&mut eligible, rng);
        eligible.truncate(k);

        debug!(
            "Sampled {} of {} eligible recommendations (excluding '{}')",
            eligible.len(),
            pool.len(),
            excluding
        );
        eligible
    }

    /// Sample with the configured size and attach titles
    pub fn recommend<R: RandomSource + ?Sized>(
        &self,
        pool: &[MediaRef],
        playing: &str,
        rng: &mut R,
    ) -> Vec<Recommendation> {
        self.sample(pool, playing, self.count, rng)
            .into_iter()
            .map(|media| Recommendation {
                title: generate_title(rng),
                media,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MediaDescriptor;
    use crate::random::ScriptedRandom;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::{HashMap, HashSet};
    use std::sync::Arc;

    fn pool(count: usize) -> Vec<MediaRef> {
        (0..count)
            .map(|i| Arc::new(MediaDescriptor::new(format!("P/{:02}.mp4", i), Some("t.webp"))))
            .collect()
    }

    #[test]
    fn test_sample_size_and_exclusion() {
        let sampler = RecommendationSampler::default();
        let mut rng = StdRng::seed_from_u64(11);

        for size in [1usize, 2, 10, 20, 21, 40] {
            let items = pool(size);
            let playing = items[0].video_path.clone();
            let picked = sampler.sample(&items, &playing, 20, &mut rng);

            assert_eq!(picked.len(), 20.min(size - 1), "pool of {}", size);
            assert!(picked.iter().all(|m| m.video_path != playing));
            let distinct: HashSet<&str> = picked.iter().map(|m| m.video_path.as_str()).collect();
            assert_eq!(distinct.len(), picked.len());
        }
    }

    #[test]
    fn test_unknown_exclusion_keeps_everything_eligible() {
        let sampler = RecommendationSampler::new(5);
        let items = pool(3);
        let picked = sampler.sample(&items, "not/here.mp4", 5, &mut StdRng::seed_from_u64(2));
        assert_eq!(picked.len(), 3);
    }

    #[test]
    fn test_scripted_sample_is_exact() {
        let sampler = RecommendationSampler::new(2);
        let items = pool(4);
        // eligible = [01, 02, 03]; i=2 -> j=0 -> [03, 02, 01]; i=1 -> j=1 -> unchanged
        let mut rng = ScriptedRandom::new(vec![0.0, 0.9]);
        let picked = sampler.sample(&items, "P/00.mp4", 2, &mut rng);
        let got: Vec<&str> = picked.iter().map(|m| m.video_path.as_str()).collect();
        assert_eq!(got, vec!["P/03.mp4", "P/02.mp4"]);
    }

    #[test]
    fn test_every_item_gets_picked_eventually() {
        let sampler = RecommendationSampler::new(1);
        let items = pool(4);
        let mut rng = StdRng::seed_from_u64(77);
        let mut hits: HashMap<String, usize> = HashMap::new();
        for _ in 0..3000 {
            for media in sampler.sample(&items, "P/00.mp4", 1, &mut rng) {
                *hits.entry(media.video_path.clone()).or_insert(0) += 1;
            }
        }
        assert_eq!(hits.len(), 3);
        assert!(hits.values().all(|&n| n > 850 && n < 1150));
    }

    #[test]
    fn test_recommend_attaches_titles() {
        let sampler = RecommendationSampler::new(3);
        let items = pool(6);
        let recs = sampler.recommend(&items, "P/01.mp4", &mut StdRng::seed_from_u64(4));
        assert_eq!(recs.len(), 3);
        assert!(recs.iter().all(|r| !r.title.is_empty() && r.media.video_path != "P/01.mp4"));
    }

    #[test]
    fn test_empty_pool() {
        let sampler = RecommendationSampler::default();
        let picked = sampler.sample(&[], "x", 20, &mut ScriptedRandom::constant(0.2));
        assert!(picked.is_empty());
    }
}
