//! Fixed-capacity transposition table keyed by canonical position keys.
//!
//! Slots are addressed by a hash of the key, and each slot stores the full
//! key, so hash collisions read as misses instead of wrong values. Values
//! are stored relative to the side to move at the node that produced them.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rookie_core::PositionKey;

/// Bound type stored with a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The value is the exact minimax value at the stored depth.
    Exact,
    /// The true value is at least the stored value (the node failed high).
    LowerBound,
    /// The true value is at most the stored value (the node failed low).
    UpperBound,
}

/// A cached search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtEntry {
    /// Score from the perspective of the side to move at the node.
    pub value: i32,
    /// Remaining depth the value was computed with.
    pub depth: u8,
    pub bound: Bound,
}

#[derive(Debug, Clone)]
struct Slot {
    key: PositionKey,
    entry: TtEntry,
    generation: u32,
}

/// Transposition table with depth-preferring replacement.
///
/// The table is never cleared implicitly; entries survive across searches.
/// A slot is overwritten when it is empty, holds the same key, was written
/// by an older search, or holds a shallower result.
#[derive(Debug, Clone)]
pub struct TranspositionTable {
    slots: Vec<Option<Slot>>,
    /// `slots.len() - 1`; the slot count is a power of two.
    mask: usize,
    generation: u32,
    len: usize,
}

impl TranspositionTable {
    /// Create a table with room for `entries` positions.
    ///
    /// The capacity is rounded up to the next power of two.
    pub fn new(entries: usize) -> Self {
        let capacity = entries.max(1).next_power_of_two();
        Self {
            slots: vec![None; capacity],
            mask: capacity - 1,
            generation: 0,
            len: 0,
        }
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.len = 0;
        self.generation = 0;
    }

    /// Start a new search. Entries from earlier searches stay readable but
    /// become replaceable regardless of depth.
    ///
    /// The counter is 32 bits wide, so an entry can only look current again
    /// after about four billion searches.
    pub fn new_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    fn index(&self, key: &PositionKey) -> usize {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        (hasher.finish() as usize) & self.mask
    }

    /// The entry for `key` if it was searched at least `depth` plies deep.
    pub fn probe(&self, key: &PositionKey, depth: u8) -> Option<TtEntry> {
        match &self.slots[self.index(key)] {
            Some(slot) if slot.key == *key && slot.entry.depth >= depth => Some(slot.entry),
            _ => None,
        }
    }

    /// The exact value for `key` if it was searched at least `depth` plies deep.
    ///
    /// Bounded entries (from nodes cut off by alpha-beta) are not returned.
    pub fn lookup(&self, key: &PositionKey, depth: u8) -> Option<i32> {
        self.probe(key, depth)
            .filter(|entry| entry.bound == Bound::Exact)
            .map(|entry| entry.value)
    }

    /// Store a search result for `key`.
    pub fn store(&mut self, key: PositionKey, value: i32, depth: u8, bound: Bound) {
        let index = self.index(&key);
        let generation = self.generation;
        let slot = &mut self.slots[index];

        let replace = match slot {
            None => true,
            Some(existing) => {
                existing.key == key
                    || existing.generation != generation
                    || depth >= existing.entry.depth
            }
        };
        if !replace {
            return;
        }

        if slot.is_none() {
            self.len += 1;
        }
        *slot = Some(Slot {
            key,
            entry: TtEntry { value, depth, bound },
            generation,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(raw: &str) -> PositionKey {
        PositionKey::from(raw.to_string())
    }

    /// Find two distinct keys that share a slot in `tt`.
    fn colliding_pair(tt: &TranspositionTable) -> (PositionKey, PositionKey) {
        let first = key("k0");
        let target = tt.index(&first);
        let second = (1..)
            .map(|i| key(&format!("k{i}")))
            .find(|k| tt.index(k) == target)
            .unwrap();
        (first, second)
    }

    #[test]
    fn capacity_rounds_up_to_power_of_two() {
        assert_eq!(TranspositionTable::new(1000).capacity(), 1024);
        assert_eq!(TranspositionTable::new(0).capacity(), 1);
    }

    #[test]
    fn store_and_probe_roundtrip() {
        let mut tt = TranspositionTable::new(64);
        tt.store(key("a"), 42, 3, Bound::Exact);
        let entry = tt.probe(&key("a"), 3).expect("entry should be found");
        assert_eq!(entry, TtEntry { value: 42, depth: 3, bound: Bound::Exact });
        assert_eq!(tt.len(), 1);
    }

    #[test]
    fn deeper_entry_serves_shallower_request() {
        let mut tt = TranspositionTable::new(64);
        tt.store(key("a"), 7, 4, Bound::Exact);
        assert_eq!(tt.lookup(&key("a"), 0), Some(7));
        assert_eq!(tt.lookup(&key("a"), 4), Some(7));
        assert_eq!(tt.lookup(&key("a"), 5), None);
    }

    #[test]
    fn lookup_skips_bounded_entries() {
        let mut tt = TranspositionTable::new(64);
        tt.store(key("a"), 7, 4, Bound::LowerBound);
        assert!(tt.probe(&key("a"), 2).is_some());
        assert_eq!(tt.lookup(&key("a"), 2), None);
    }

    #[test]
    fn probe_miss_returns_none() {
        let tt = TranspositionTable::new(64);
        assert!(tt.probe(&key("nothing"), 0).is_none());
        assert!(tt.is_empty());
    }

    #[test]
    fn same_key_is_always_overwritten() {
        let mut tt = TranspositionTable::new(64);
        tt.store(key("a"), 1, 5, Bound::Exact);
        tt.store(key("a"), 2, 1, Bound::Exact);
        assert_eq!(tt.lookup(&key("a"), 1), Some(2));
        assert_eq!(tt.len(), 1);
    }

    #[test]
    fn collision_is_a_miss_not_a_wrong_value() {
        let mut tt = TranspositionTable::new(8);
        let (a, b) = colliding_pair(&tt);
        tt.store(a.clone(), 10, 2, Bound::Exact);
        assert_eq!(tt.probe(&b, 0), None);
    }

    #[test]
    fn shallower_colliding_entry_does_not_replace_deeper() {
        let mut tt = TranspositionTable::new(8);
        let (a, b) = colliding_pair(&tt);
        tt.store(a.clone(), 10, 4, Bound::Exact);
        tt.store(b.clone(), 20, 1, Bound::Exact);
        assert_eq!(tt.lookup(&a, 4), Some(10));
        assert_eq!(tt.lookup(&b, 1), None);
    }

    #[test]
    fn older_generation_is_replaceable() {
        let mut tt = TranspositionTable::new(8);
        let (a, b) = colliding_pair(&tt);
        tt.store(a.clone(), 10, 4, Bound::Exact);
        tt.new_generation();
        tt.store(b.clone(), 20, 1, Bound::Exact);
        assert_eq!(tt.lookup(&b, 1), Some(20));
        assert_eq!(tt.lookup(&a, 0), None);
        assert_eq!(tt.len(), 1);
    }

    #[test]
    fn old_entry_stays_replaceable_after_many_searches() {
        let mut tt = TranspositionTable::new(8);
        let (a, b) = colliding_pair(&tt);
        tt.store(a.clone(), 10, 4, Bound::Exact);
        for _ in 0..256 {
            tt.new_generation();
        }
        tt.store(b.clone(), 20, 1, Bound::Exact);
        assert_eq!(tt.lookup(&b, 1), Some(20));
        assert_eq!(tt.lookup(&a, 0), None);
    }

    #[test]
    fn entries_survive_new_generation() {
        let mut tt = TranspositionTable::new(64);
        tt.store(key("a"), 3, 2, Bound::Exact);
        tt.new_generation();
        assert_eq!(tt.lookup(&key("a"), 2), Some(3));
    }

    #[test]
    fn clear_removes_all_entries() {
        let mut tt = TranspositionTable::new(64);
        tt.store(key("a"), 3, 2, Bound::Exact);
        tt.store(key("b"), 4, 2, Bound::Exact);
        tt.clear();
        assert!(tt.is_empty());
        assert!(tt.probe(&key("a"), 0).is_none());
    }
}
