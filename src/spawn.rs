//! Spawn bookkeeping
//!
//! Each partition tracks which spawn definitions are materialized right now.
//! Only membership lives here; geometry and the definitions themselves are
//! owned elsewhere. Confined to the simulation thread.

use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SpawnKind {
    Creature,
    GameObject,
}

/// Reference to a spawn definition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpawnRecord {
    pub kind: SpawnKind,
    pub id: u64,
}

impl SpawnRecord {
    #[inline]
    pub const fn new(kind: SpawnKind, id: u64) -> Self {
        Self { kind, id }
    }
}

/// Tracks the spawns currently materialized within one partition, one
/// ordered set per kind.
///
/// Iteration is in ascending id order, so enumerations diff deterministically
/// across snapshots.
#[derive(Clone, Debug, Default)]
pub struct SpawnIndex {
    creatures: BTreeSet<u64>,
    game_objects: BTreeSet<u64>,
}

impl SpawnIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `record` as materialized. Idempotent.
    ///
    /// Returns `true` if the spawn was not tracked before.
    pub fn add(&mut self, record: SpawnRecord) -> bool {
        self.set_mut(record.kind).insert(record.id)
    }

    /// Removes `record`; no-op if it was not tracked.
    pub fn remove(&mut self, record: SpawnRecord) -> bool {
        self.set_mut(record.kind).remove(&record.id)
    }

    pub fn contains(&self, record: SpawnRecord) -> bool {
        self.set(record.kind).contains(&record.id)
    }

    /// Iterates the tracked spawn ids of `kind` in ascending order.
    pub fn iter(&self, kind: SpawnKind) -> impl Iterator<Item = u64> + '_ {
        self.set(kind).iter().copied()
    }

    pub fn len(&self, kind: SpawnKind) -> usize {
        self.set(kind).len()
    }

    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty() && self.game_objects.is_empty()
    }

    pub fn clear(&mut self) {
        self.creatures.clear();
        self.game_objects.clear();
    }

    fn set(&self, kind: SpawnKind) -> &BTreeSet<u64> {
        match kind {
            SpawnKind::Creature => &self.creatures,
            SpawnKind::GameObject => &self.game_objects,
        }
    }

    fn set_mut(&mut self, kind: SpawnKind) -> &mut BTreeSet<u64> {
        match kind {
            SpawnKind::Creature => &mut self.creatures,
            SpawnKind::GameObject => &mut self.game_objects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SpawnIndex, SpawnKind, SpawnRecord};

    #[test]
    fn add_remove() {
        let mut index = SpawnIndex::new();
        let record = SpawnRecord::new(SpawnKind::Creature, 42);

        assert!(index.add(record));
        assert!(index.contains(record));
        assert!(index.remove(record));
        assert!(!index.contains(record));
        assert!(index.is_empty());

        // Removing again is a no-op.
        assert!(!index.remove(record));
    }

    #[test]
    fn add_is_idempotent() {
        let mut index = SpawnIndex::new();
        let record = SpawnRecord::new(SpawnKind::GameObject, 7);

        assert!(index.add(record));
        assert!(!index.add(record));
        assert_eq!(index.len(SpawnKind::GameObject), 1);
    }

    #[test]
    fn kinds_are_disjoint() {
        let mut index = SpawnIndex::new();
        index.add(SpawnRecord::new(SpawnKind::Creature, 1));
        index.add(SpawnRecord::new(SpawnKind::GameObject, 1));

        assert_eq!(index.len(SpawnKind::Creature), 1);
        assert_eq!(index.len(SpawnKind::GameObject), 1);

        index.remove(SpawnRecord::new(SpawnKind::Creature, 1));
        assert!(!index.contains(SpawnRecord::new(SpawnKind::Creature, 1)));
        assert!(index.contains(SpawnRecord::new(SpawnKind::GameObject, 1)));
    }

    #[test]
    fn iteration_is_sorted() {
        let mut index = SpawnIndex::new();
        for id in [9, 2, 5, 2] {
            index.add(SpawnRecord::new(SpawnKind::Creature, id));
        }

        let ids: Vec<_> = index.iter(SpawnKind::Creature).collect();
        assert_eq!(ids, [2, 5, 9]);
    }
}
