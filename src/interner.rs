//! Script name interning
//!
//! Behavior script names are referenced constantly during the tick; interning
//! gives each one a stable dense id so the hot paths compare integers. Ids
//! are assigned monotonically and never reused. Confined to the simulation
//! thread.

use ahash::HashMap;

/// Dense handle to an interned name. Id 0 is the "no name" sentinel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct NameId(u32);

impl NameId {
    /// The reserved sentinel, always mapping to the empty string.
    pub const NONE: Self = Self(0);

    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

#[derive(Clone, Debug)]
pub struct InternedName {
    pub id: NameId,
    pub name: String,
    /// Whether the name was declared by an external binding and must be
    /// picked up by the validation pass.
    pub externally_bound: bool,
}

/// Bijective name <-> dense id table.
#[derive(Clone, Debug)]
pub struct NameInterner {
    names: Vec<InternedName>,
    by_name: HashMap<String, NameId>,
}

impl NameInterner {
    /// Creates a new interner with the empty string pre-seeded at id 0.
    pub fn new() -> Self {
        let mut interner = Self {
            names: Vec::new(),
            by_name: HashMap::default(),
        };

        let id = interner.insert("", false);
        debug_assert_eq!(id, NameId::NONE);

        interner
    }

    /// Interns `name`, returning its id.
    ///
    /// A name that is already interned keeps its id and its original
    /// `externally_bound` flag; the repeat call's flag is ignored.
    pub fn insert(&mut self, name: &str, externally_bound: bool) -> NameId {
        if let Some(&id) = self.by_name.get(name) {
            return id;
        }

        let id = NameId(self.names.len() as u32);
        self.names.push(InternedName {
            id,
            name: name.to_owned(),
            externally_bound,
        });
        self.by_name.insert(name.to_owned(), id);

        tracing::trace!("interned name {:?} as {}", name, id.get());

        id
    }

    /// Bounds-checked reverse lookup.
    pub fn get(&self, id: NameId) -> Option<&InternedName> {
        self.names.get(id.0 as usize)
    }

    /// Forward lookup. Note that the empty string resolves to the sentinel
    /// entry; callers treat that as "no script", not as a hit.
    pub fn lookup(&self, name: &str) -> Option<&InternedName> {
        let id = *self.by_name.get(name)?;
        Some(&self.names[id.0 as usize])
    }

    /// Names declared by external bindings, in insertion order.
    pub fn externally_bound(&self) -> impl Iterator<Item = &str> {
        self.names
            .iter()
            .filter(|entry| entry.externally_bound)
            .map(|entry| entry.name.as_str())
    }

    /// The number of interned names, including the sentinel.
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.names.len(), self.by_name.len());
        self.names.len()
    }
}

impl Default for NameInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{NameId, NameInterner};

    #[test]
    fn empty_string_is_sentinel() {
        let mut interner = NameInterner::new();
        assert_eq!(interner.insert("", true), NameId::NONE);
        assert_eq!(interner.lookup("").map(|e| e.id), Some(NameId::NONE));
        assert_eq!(interner.get(NameId::NONE).map(|e| e.name.as_str()), Some(""));
        assert_eq!(interner.len(), 1);
    }

    #[test]
    fn insert_is_idempotent() {
        let mut interner = NameInterner::new();
        let a = interner.insert("boss_ai", true);
        let b = interner.insert("boss_ai", false);
        assert_eq!(a, b);

        // The first registration's flag wins.
        assert!(interner.get(a).unwrap().externally_bound);
    }

    #[test]
    fn ids_are_dense() {
        let mut interner = NameInterner::new();
        let a = interner.insert("a", false);
        let b = interner.insert("b", false);
        let c = interner.insert("c", false);
        assert_eq!((a.get(), b.get(), c.get()), (1, 2, 3));
        assert_eq!(interner.len(), 4);

        for id in 0..4 {
            assert!(interner.get(NameId(id)).is_some());
        }
        assert!(interner.get(NameId(4)).is_none());
    }

    #[test]
    fn lookup_miss() {
        let interner = NameInterner::new();
        assert!(interner.lookup("never_inserted").is_none());
    }

    #[test]
    fn externally_bound_names() {
        let mut interner = NameInterner::new();
        interner.insert("alpha", true);
        interner.insert("beta", false);
        interner.insert("gamma", true);

        let bound: Vec<_> = interner.externally_bound().collect();
        assert_eq!(bound, ["alpha", "gamma"]);
    }
}
