//! Droplist is an ordered set of strings backed by a drop list: a randomized
//! multi-level linked list, better known as a skip list.
//!
//! ## Key Features:
//!
//! - **Randomized towers**: every key lives on level 0 and, with geometrically
//!   decreasing probability, on each level above it. Membership tests, inserts
//!   and removals are expected `O(log n)` as long as the set stays below
//!   roughly `2^max_level_count` elements.
//!
//! - **Direction-aware order**: a set is sorted either ascending or descending,
//!   and [`StringSet::reverse`] flips the direction in place.
//!
//! - **Injectable randomness**: tower heights come from a [`LevelGenerator`],
//!   so a seeded RNG (or a scripted sequence of coin flips) makes the layout of
//!   a set fully reproducible.
//!
//! ```
//! use droplist::StringSet;
//!
//! let mut set = StringSet::new(4, true).unwrap();
//! set.add("banana");
//! set.add("apple");
//! set.add("cherry");
//! assert_eq!(set.get_elements(), ["apple", "banana", "cherry"]);
//!
//! set.reverse();
//! assert_eq!(set.get_elements(), ["cherry", "banana", "apple"]);
//! ```

use thiserror::Error;

mod arena;
mod level;
mod node;
mod string_set;

#[cfg(any(test, feature = "testutil"))]
pub mod testutil;

pub use level::{CoinFlip, LevelGenerator};
pub use string_set::{DEFAULT_MAX_LEVEL_COUNT, StringSet};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildErr {
    #[error("a drop list needs at least one level")]
    ZeroLevelCount,
}
