use std::fmt::Debug;

use log::{debug, trace};

use crate::{
    BuildErr,
    arena::Arena,
    level::{CoinFlip, LevelGenerator},
    node::{Node, NodeId},
};

/// Level count used by [`StringSet::default`]. Good for sets of up to roughly
/// 2^17 elements before searches start to degrade.
pub const DEFAULT_MAX_LEVEL_COUNT: usize = 16;

/// An ordered set of strings stored in a drop list.
///
/// Every key sits on level 0 and on a random number of levels above it, each
/// higher level skipping over more of the set. `add`, `remove` and `contains`
/// are `O(log n)` on average for sets smaller than `2^(max_level_count + 1)`;
/// copying and [`StringSet::get_elements`] are `O(n)`.
///
/// # Examples
///
/// ```
/// use droplist::StringSet;
///
/// let mut set = StringSet::new(4, true).unwrap();
/// assert!(set.add("banana"));
/// assert!(set.add("apple"));
/// assert!(!set.add("apple"));
///
/// assert!(set.contains("banana"));
/// assert!(!set.contains("kiwi"));
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.get_elements(), ["apple", "banana"]);
/// ```
///
/// Heights can be made reproducible by seeding the generator:
///
/// ```
/// use droplist::StringSet;
///
/// let set: StringSet = StringSet::with_seed(8, false, 0xDEAD_BEEF).unwrap();
/// assert!(!set.is_ascending());
/// assert!(set.is_empty());
/// ```
pub struct StringSet<G = CoinFlip> {
    arena: Arena,
    max_level_count: usize,
    ascending: bool,
    count: usize,
    levels: G,
}

impl StringSet<CoinFlip> {
    /// Creates an empty set whose nodes span at most `max_level_count` levels,
    /// drawing heights from an entropy-seeded RNG.
    ///
    /// Fails with [`BuildErr::ZeroLevelCount`] if `max_level_count` is zero.
    pub fn new(max_level_count: usize, ascending: bool) -> Result<Self, BuildErr> {
        Self::with_level_generator(max_level_count, ascending, CoinFlip::from_entropy())
    }

    /// Like [`StringSet::new`], but heights are drawn from an RNG seeded with
    /// `seed`, so the same sequence of operations always builds the same towers.
    pub fn with_seed(max_level_count: usize, ascending: bool, seed: u64) -> Result<Self, BuildErr> {
        Self::with_level_generator(max_level_count, ascending, CoinFlip::seeded(seed))
    }
}

impl Default for StringSet<CoinFlip> {
    /// An empty ascending set with [`DEFAULT_MAX_LEVEL_COUNT`] levels.
    fn default() -> Self {
        Self::from_parts(DEFAULT_MAX_LEVEL_COUNT, true, CoinFlip::default())
    }
}

impl<G> StringSet<G> {
    fn from_parts(max_level_count: usize, ascending: bool, levels: G) -> Self {
        debug_assert!(max_level_count > 0);
        StringSet {
            arena: Arena::with_head(max_level_count),
            max_level_count,
            ascending,
            count: 0,
            levels,
        }
    }

    /// Returns the number of keys in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns `true` if keys are kept in ascending order.
    #[inline]
    pub fn is_ascending(&self) -> bool {
        self.ascending
    }

    /// The maximum number of levels any node may occupy.
    #[inline]
    pub fn max_level_count(&self) -> usize {
        self.max_level_count
    }

    /// Returns `true` if the set contains `target`.
    pub fn contains(&self, target: &str) -> bool {
        let prev = self.locate(target);
        self.successor_matches(prev[0], target).is_some()
    }

    /// Removes `target` from the set.
    /// Returns `true` if the removal occurred, `false` if `target` was absent.
    pub fn remove(&mut self, target: &str) -> bool {
        let prev = self.locate(target);
        let Some(found) = self.successor_matches(prev[0], target) else {
            return false;
        };

        let node = self.arena.release(found);
        for (level, link) in node.links.into_iter().enumerate() {
            let pred = &mut self.arena[prev[level]];
            debug_assert_eq!(pred.links[level], Some(found));
            pred.links[level] = link;
        }
        self.count -= 1;
        true
    }

    /// Returns a snapshot of every key, in set order.
    pub fn get_elements(&self) -> Vec<String> {
        self.keys().map(str::to_owned).collect()
    }

    /// Removes every key. The level count and direction are kept.
    pub fn clear(&mut self) {
        trace!("clearing drop list of {} keys", self.count);
        self.arena.truncate_to_head(self.max_level_count);
        debug_assert_eq!(self.arena.live(), 1);
        self.count = 0;
    }

    /// Walks the level-0 chain.
    fn keys(&self) -> impl Iterator<Item = &str> {
        std::iter::successors(self.arena[NodeId::HEAD].next(0), |&id| self.arena[id].next(0))
            .map(|id| self.arena[id].key.as_str())
    }

    /// Returns `true` if `a` sorts strictly before `b` in this set's direction.
    #[inline]
    fn precedes(&self, a: &str, b: &str) -> bool {
        if self.ascending { a < b } else { a > b }
    }

    /// Returns the level-0 successor of `pred` if it holds `target`.
    #[inline]
    fn successor_matches(&self, pred: NodeId, target: &str) -> Option<NodeId> {
        self.arena[pred]
            .next(0)
            .filter(|&next| self.arena[next].key == target)
    }

    /// Finds, for every level, the last node whose key strictly precedes
    /// `target`. The head precedes everything.
    ///
    /// Levels are scanned from the top down. A node reached while scanning a
    /// level also precedes `target` on every level below it, so it becomes the
    /// predecessor for all of those levels at once and the lower scans resume
    /// from it rather than from the head.
    ///
    /// On return `prev[0]`'s level-0 successor is either empty, the node
    /// holding `target`, or the first node that does not precede `target`.
    fn locate(&self, target: &str) -> Vec<NodeId> {
        let mut prev = vec![NodeId::HEAD; self.max_level_count];
        for level in (0..self.max_level_count).rev() {
            let mut current = prev[level];
            while let Some(next) = self.arena[current].next(level) {
                if !self.precedes(&self.arena[next].key, target) {
                    break;
                }
                prev[..=level].fill(next);
                current = next;
            }
        }
        prev
    }
}

impl<G: LevelGenerator> StringSet<G> {
    /// Creates an empty set drawing node heights from `levels`.
    ///
    /// Fails with [`BuildErr::ZeroLevelCount`] if `max_level_count` is zero.
    pub fn with_level_generator(
        max_level_count: usize,
        ascending: bool,
        levels: G,
    ) -> Result<Self, BuildErr> {
        if max_level_count == 0 {
            return Err(BuildErr::ZeroLevelCount);
        }
        debug!("new drop list: max_level_count={max_level_count} ascending={ascending}");
        Ok(Self::from_parts(max_level_count, ascending, levels))
    }

    /// Inserts `target` unless it is already present.
    /// Returns `true` if the insertion occurred, `false` otherwise.
    pub fn add(&mut self, target: impl Into<String>) -> bool {
        let target = target.into();
        let prev = self.locate(&target);
        if self.successor_matches(prev[0], &target).is_some() {
            return false;
        }

        let height = self.levels.height(self.max_level_count);
        debug_assert!((1..=self.max_level_count).contains(&height));

        let id = self.arena.alloc(Node::new(target, height));
        debug_assert_eq!(self.arena[id].height(), height);
        for (level, &pred) in prev.iter().enumerate().take(height) {
            let succ = std::mem::replace(&mut self.arena[pred].links[level], Some(id));
            self.arena[id].links[level] = succ;
        }
        self.count += 1;
        true
    }

    /// Reverses the sort direction of the set.
    ///
    /// The keys are taken out and inserted again under the new direction, so
    /// every tower is redrawn.
    pub fn reverse(&mut self) {
        trace!(
            "reversing drop list of {} keys (ascending={})",
            self.count, self.ascending
        );
        let keys = self.get_elements();
        for key in &keys {
            self.remove(key);
        }
        self.arena[NodeId::HEAD].links.fill(None);
        self.ascending = !self.ascending;
        for key in keys {
            self.add(key);
        }
    }

    /// Re-inserts every key of `source`, one at a time.
    fn insert_all_from<H>(&mut self, source: &StringSet<H>) {
        for key in source.keys() {
            self.add(key);
        }
    }
}

impl<G: LevelGenerator + Clone> Clone for StringSet<G> {
    /// Deep copies the set. The copy shares no nodes with `self`: each key is
    /// inserted again, so its towers are drawn afresh.
    fn clone(&self) -> Self {
        let mut copy = Self::from_parts(self.max_level_count, self.ascending, self.levels.clone());
        copy.insert_all_from(self);
        copy
    }

    /// Replaces the contents of `self` with a deep copy of `source`, adopting
    /// its level count and direction. `self` keeps its own level generator.
    fn clone_from(&mut self, source: &Self) {
        trace!(
            "assigning drop list of {} keys over {} keys",
            source.count, self.count
        );
        self.max_level_count = source.max_level_count;
        self.clear();
        self.ascending = source.ascending;
        self.insert_all_from(source);
    }
}

impl<G, H> PartialEq<StringSet<H>> for StringSet<G> {
    /// Two sets are equal when they share a direction and hold the same keys.
    /// Level counts and tower layouts are not compared.
    fn eq(&self, other: &StringSet<H>) -> bool {
        self.ascending == other.ascending
            && self.count == other.count
            && itertools::equal(self.keys(), other.keys())
    }
}

impl<G> Eq for StringSet<G> {}

impl<G> Debug for StringSet<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix: Vec<_> = self.keys().take(10).collect();
        f.debug_struct("StringSet")
            .field("len", &self.count)
            .field("ascending", &self.ascending)
            .field("max_level_count", &self.max_level_count)
            .field("prefix", &prefix)
            .finish()
    }
}

impl<S: Into<String>, G: LevelGenerator> Extend<S> for StringSet<G> {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for key in iter {
            self.add(key);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for StringSet<CoinFlip> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}
