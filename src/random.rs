// Randomness plumbing - every shuffle, sample and title goes through here
// so tests can script the exact sequence of values

use rand::rngs::{StdRng, ThreadRng};
use rand::Rng;

/// Source of uniformly distributed values in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize {
        let idx = (self.next_unit() * len as f64) as usize;
        // Guard against a source that hands back exactly 1.0
        idx.min(len - 1)
    }
}

impl RandomSource for ThreadRng {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

impl RandomSource for StdRng {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Default production source
pub fn thread_source() -> ThreadRng {
    rand::thread_rng()
}

/// Replays a fixed list of values, cycling when it runs out.
///
/// Values outside `[0, 1)` are clamped into range.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }

    /// A source that always returns the same value
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

/// In-place Fisher-Yates shuffle driven by `rng`.
///
/// Walks from the back; slot `i` swaps with a uniform pick from `0..=i`,
/// so every permutation is equally likely for a uniform source.
pub fn shuffle<T, R: RandomSource + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.next_index(i + 1);
        items.swap(i, j);
    }
}

/// Shuffled copy of `items`, leaving the input untouched.
pub fn shuffled<T: Clone, R: RandomSource + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut copy = items.to_vec();
    shuffle(&mut copy, rng);
    copy
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[test]
    fn test_scripted_shuffle_is_exact() {
        // i=3 -> 0.0*4 = 0, i=2 -> 0.99*3 = 2, i=1 -> 0.5*2 = 1
        let mut rng = ScriptedRandom::new(vec![0.0, 0.99, 0.5]);
        let mut items = vec!['a', 'b', 'c', 'd'];
        shuffle(&mut items, &mut rng);
        assert_eq!(items, vec!['d', 'b', 'c', 'a']);
    }

    #[test]
    fn test_shuffle_keeps_every_element() {
        let mut rng = StdRng::seed_from_u64(7);
        let original: Vec<u32> = (0..50).collect();
        let mut copy = shuffled(&original, &mut rng);
        copy.sort_unstable();
        assert_eq!(copy, original);
    }

    #[test]
    fn test_shuffle_handles_tiny_inputs() {
        let mut rng = ScriptedRandom::constant(0.3);
        let mut empty: Vec<u8> = Vec::new();
        shuffle(&mut empty, &mut rng);
        assert!(empty.is_empty());

        let mut single = vec![42];
        shuffle(&mut single, &mut rng);
        assert_eq!(single, vec![42]);
    }

    #[test]
    fn test_shuffle_covers_all_permutations() {
        let mut rng = StdRng::seed_from_u64(1234);
        let mut seen: HashMap<Vec<u8>, usize> = HashMap::new();
        for _ in 0..6000 {
            *seen.entry(shuffled(&[1u8, 2, 3], &mut rng)).or_insert(0) += 1;
        }
        assert_eq!(seen.len(), 6);
        // ~1000 each; loose bound keeps this stable
        assert!(seen.values().all(|&count| count > 800 && count < 1200));
    }

    #[test]
    fn test_next_index_never_overflows() {
        let mut rng = ScriptedRandom::constant(1.0);
        assert_eq!(rng.next_index(5), 4);
        assert_eq!(rng.next_index(1), 0);
    }
}
