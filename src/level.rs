use rand::{Rng, SeedableRng, rngs::StdRng};

/// A source of fair coin flips used to draw node heights.
///
/// Implementors only provide [`LevelGenerator::flip`]; the capped geometric
/// height distribution is shared by every generator.
pub trait LevelGenerator {
    /// Returns `true` with probability one half.
    fn flip(&mut self) -> bool;

    /// Draws a height in `[1, max_level_count]`.
    ///
    /// Starts at 1 and grows by one level for every successful flip until a
    /// flip fails or the cap is reached. The flip is drawn before the cap is
    /// checked, which gives `P(height = k) = 2^-k` below the cap and collapses
    /// the remaining mass onto `max_level_count`.
    fn height(&mut self, max_level_count: usize) -> usize {
        let mut height = 1;
        while self.flip() && height < max_level_count {
            height += 1;
        }
        height
    }
}

impl<G: LevelGenerator + ?Sized> LevelGenerator for &mut G {
    #[inline]
    fn flip(&mut self) -> bool {
        (**self).flip()
    }
}

/// The default [`LevelGenerator`]: fair coin flips drawn from a `rand` RNG.
#[derive(Clone, Debug)]
pub struct CoinFlip<R = StdRng> {
    rng: R,
}

impl<R: Rng> CoinFlip<R> {
    pub fn new(rng: R) -> Self {
        CoinFlip { rng }
    }
}

impl CoinFlip<StdRng> {
    /// A generator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// A reproducible generator; two generators built from the same seed draw
    /// identical heights.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl Default for CoinFlip<StdRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R: Rng> LevelGenerator for CoinFlip<R> {
    #[inline]
    fn flip(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::ScriptedFlips;

    #[test]
    fn test_height_counts_successful_flips() {
        let mut levels = ScriptedFlips::new([true, true, false]);
        assert_eq!(levels.height(8), 3);

        // an exhausted script always fails
        assert_eq!(levels.height(8), 1);
    }

    #[test]
    fn test_height_is_capped() {
        let mut levels = ScriptedFlips::new([true; 10]);
        assert_eq!(levels.height(4), 4);
        // the flip that hit the cap was consumed too
        assert_eq!(levels.remaining(), 6);
    }

    #[test]
    fn test_single_level_still_flips() {
        let mut levels = ScriptedFlips::new([true, false]);
        assert_eq!(levels.height(1), 1);
        assert_eq!(levels.remaining(), 1);
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = CoinFlip::seeded(0xDEAD_BEEF);
        let mut b = CoinFlip::seeded(0xDEAD_BEEF);
        for _ in 0..256 {
            assert_eq!(a.height(16), b.height(16));
        }
    }

    #[test]
    fn test_height_distribution() {
        const DRAWS: usize = 1 << 16;
        const MAX: usize = 4;

        let mut levels = CoinFlip::seeded(7);
        let mut histogram = [0usize; MAX + 1];
        for _ in 0..DRAWS {
            let height = levels.height(MAX);
            assert!((1..=MAX).contains(&height));
            histogram[height] += 1;
        }

        // expected: 1/2, 1/4, 1/8, and 1/8 collapsed onto the cap
        let expected = [0.0, 0.5, 0.25, 0.125, 0.125];
        for height in 1..=MAX {
            let observed = histogram[height] as f64 / DRAWS as f64;
            assert!(
                (observed - expected[height]).abs() < 0.01,
                "height {height}: observed {observed:.4}, expected {}",
                expected[height]
            );
        }
    }
}
