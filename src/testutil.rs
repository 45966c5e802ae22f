use std::collections::VecDeque;

use itertools::Itertools;
use proptest::{prelude::Just, prop_oneof, strategy::Strategy};
use rand::{Rng, SeedableRng, distributions::Alphanumeric};

use crate::LevelGenerator;

/// A [`LevelGenerator`] that replays a fixed script of coin flips. Once the
/// script runs out every flip fails, so every further node gets height 1.
#[derive(Clone, Debug, Default)]
pub struct ScriptedFlips {
    flips: VecDeque<bool>,
}

impl ScriptedFlips {
    pub fn new(flips: impl IntoIterator<Item = bool>) -> Self {
        Self { flips: flips.into_iter().collect() }
    }

    /// Scripts the flips that produce exactly `heights`, in order, for a set
    /// with `max_level_count` levels.
    #[track_caller]
    pub fn for_heights(heights: impl IntoIterator<Item = usize>, max_level_count: usize) -> Self {
        let mut flips = VecDeque::new();
        for height in heights {
            assert!(
                (1..=max_level_count).contains(&height),
                "height {height} out of range"
            );
            flips.extend(std::iter::repeat_n(true, height - 1));
            // reaching the cap still draws one more flip
            flips.push_back(height == max_level_count);
        }
        Self { flips }
    }

    /// Number of flips left in the script.
    pub fn remaining(&self) -> usize {
        self.flips.len()
    }
}

impl LevelGenerator for ScriptedFlips {
    fn flip(&mut self) -> bool {
        self.flips.pop_front().unwrap_or(false)
    }
}

/// Seeded generator of random alphanumeric keys.
pub struct KeyGen {
    rng: rand::rngs::StdRng,
}

impl KeyGen {
    pub fn new(seed: u64) -> Self {
        let rng = rand::rngs::StdRng::seed_from_u64(seed);
        Self { rng }
    }

    pub fn key(&mut self, len: usize) -> String {
        (&mut self.rng)
            .sample_iter(Alphanumeric)
            .take(len)
            .map(char::from)
            .collect()
    }

    /// `count` distinct keys of length `len`, in random (insertion) order.
    #[track_caller]
    pub fn distinct(&mut self, count: usize, len: usize) -> Vec<String> {
        assert!(
            (62f64).powi(len as i32) >= 2.0 * count as f64,
            "{count} distinct keys of length {len} are too crowded"
        );
        let out = std::iter::repeat_with(|| self.key(len))
            .unique()
            .take(count)
            .collect_vec();
        assert_eq!(out.len(), count);
        out
    }
}

/// A single operation against a set, for model-based property tests.
#[derive(Clone, Debug)]
pub enum Op {
    Add(String),
    Remove(String),
    Contains(String),
    Reverse,
}

/// Operations over a small key space so that adds, removes and lookups
/// frequently collide.
pub fn op_strategy() -> impl Strategy<Value = Op> {
    let key = || "[a-e]{0,3}";
    prop_oneof![
        4 => key().prop_map(Op::Add),
        2 => key().prop_map(Op::Remove),
        2 => key().prop_map(Op::Contains),
        1 => Just(Op::Reverse),
    ]
}
