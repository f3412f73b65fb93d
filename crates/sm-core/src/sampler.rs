use rand::seq::SliceRandom;
use rand::Rng;

/// Picks distinct elements at random without replacement
pub struct RandomSampler;

impl RandomSampler {
    /// Up to `k` elements of `items` in random order. The input is left untouched.
    pub fn sample<T: Clone>(items: &[T], k: usize) -> Vec<T> {
        Self::sample_with(items, k, &mut rand::thread_rng())
    }

    /// [`RandomSampler::sample`] with a caller supplied RNG
    pub fn sample_with<T: Clone, R: Rng + ?Sized>(items: &[T], k: usize, rng: &mut R) -> Vec<T> {
        if items.is_empty() || k == 0 {
            return Vec::new();
        }

        // Fisher-Yates over a copy
        let mut shuffled = items.to_vec();
        shuffled.shuffle(rng);
        shuffled.truncate(k);
        shuffled
    }
}
