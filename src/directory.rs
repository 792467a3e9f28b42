//! Player directory
//!
//! The [`EntityDirectory`] is the single source of truth for "which players
//! are connected". It is the only piece of the identity layer touched from
//! outside the simulation thread: session threads register and unregister on
//! login/logout, the tick thread resolves, and the save sweep snapshots.
//!
//! One lock guards the GUID map and the name index together, so no observer
//! ever sees the two disagree. The lock is never held across per-entity
//! work; bulk consumers go through [`EntityDirectory::snapshot`].

use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use ahash::HashMap;
use parking_lot::RwLock;
use thiserror::Error;

use crate::entity::{Player, WorldEntity};
use crate::guid::Guid;
use crate::map::MapId;
use crate::name::NameNormalizer;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RenameError {
    #[error("no player registered for {0}")]
    UnknownGuid(Guid),
    #[error("name {0:?} is already taken")]
    NameTaken(String),
}

/// The global registry of connected players.
///
/// Cloning is cheap and yields a handle to the same directory.
#[derive(Clone)]
pub struct EntityDirectory {
    inner: Arc<DirectoryInner>,
}

struct DirectoryInner {
    normalizer: Box<dyn NameNormalizer>,
    players: RwLock<PlayerMaps>,
}

#[derive(Default)]
struct PlayerMaps {
    by_guid: HashMap<Guid, Entry>,
    // Normalized name -> GUID. Always mutated together with `by_guid`.
    by_name: HashMap<String, Guid>,
}

struct Entry {
    // Display name as registered; `name_key` is its normalized form and the
    // key this entry occupies in `by_name`.
    name: String,
    name_key: String,
    player: Arc<Player>,
}

impl EntityDirectory {
    pub fn new<N>(normalizer: N) -> Self
    where
        N: NameNormalizer + 'static,
    {
        Self {
            inner: Arc::new(DirectoryInner {
                normalizer: Box::new(normalizer),
                players: RwLock::default(),
            }),
        }
    }

    /// Registers a player under its GUID and normalized display name.
    ///
    /// Registration is last write wins on both keys: a second registration
    /// for the same GUID replaces the first, and a registration under an
    /// already-taken name evicts the previous owner's entry entirely, so
    /// neither index ever points at a superseded entry.
    pub fn register<T>(&self, name: T, player: Arc<Player>)
    where
        T: Into<String>,
    {
        let name = name.into();
        let name_key = self.inner.normalizer.normalize(&name);
        let guid = player.guid();

        let mut maps = self.inner.players.write();

        if let Some(prev) = maps.by_guid.insert(
            guid,
            Entry {
                name,
                name_key: name_key.clone(),
                player,
            },
        ) {
            tracing::warn!("player {} registered twice, replacing entry", guid);

            // Only drop the old name key if it still belongs to this GUID;
            // a key owned by another player stays untouched.
            if prev.name_key != name_key && maps.by_name.get(&prev.name_key) == Some(&guid) {
                maps.by_name.remove(&prev.name_key);
            }
        }

        if let Some(prev_guid) = maps.by_name.insert(name_key, guid) {
            if prev_guid != guid {
                // The evicted player owned no other name key, so its whole
                // entry goes; leaving it would strand a GUID entry with no
                // matching name entry.
                maps.by_guid.remove(&prev_guid);
                tracing::warn!("player {} evicted, name taken over by {}", prev_guid, guid);
            }
        }

        tracing::debug!("registered player {}", guid);
    }

    /// Removes the player from both indices.
    ///
    /// No-op unless the stored entry is exactly `player`, so a late
    /// unregister of a stale session cannot erase a newer registration for
    /// the same GUID.
    pub fn unregister(&self, player: &Arc<Player>) {
        let guid = player.guid();

        let mut maps = self.inner.players.write();

        match maps.by_guid.get(&guid) {
            Some(entry) if Arc::ptr_eq(&entry.player, player) => {}
            _ => return,
        }

        if let Some(entry) = maps.by_guid.remove(&guid) {
            if maps.by_name.get(&entry.name_key) == Some(&guid) {
                maps.by_name.remove(&entry.name_key);
            }
        }

        tracing::debug!("unregistered player {}", guid);
    }

    /// Returns the registered player, regardless of in-world status.
    pub fn find_by_guid(&self, guid: Guid) -> Option<Arc<Player>> {
        let maps = self.inner.players.read();
        maps.by_guid.get(&guid).map(|entry| entry.player.clone())
    }

    /// Returns the player only if it is in world *and* currently on `map`.
    ///
    /// While a transfer between partitions is in flight the player is
    /// resolvable by [`find_by_guid`] but absent here, on the old and the
    /// new partition alike.
    ///
    /// [`find_by_guid`]: Self::find_by_guid
    pub fn find_by_guid_scoped(&self, map: MapId, guid: Guid) -> Option<Arc<Player>> {
        let player = self.find_by_guid(guid)?;

        // Checked outside the directory lock; the player publishes its own
        // state.
        if player.is_in_world() && player.map() == Some(map) {
            Some(player)
        } else {
            None
        }
    }

    /// Looks up a player by display name, in any partition.
    ///
    /// The name is normalized first; a player that is registered but not in
    /// world is not returned.
    pub fn find_by_name(&self, name: &str) -> Option<Arc<Player>> {
        let name_key = self.inner.normalizer.normalize(name);

        let player = {
            let maps = self.inner.players.read();
            let guid = maps.by_name.get(&name_key)?;
            maps.by_guid.get(guid)?.player.clone()
        };

        player.is_in_world().then_some(player)
    }

    /// Changes a player's display name, re-keying the name index atomically.
    pub fn rename<T>(&self, guid: Guid, new_name: T) -> Result<(), RenameError>
    where
        T: Into<String>,
    {
        let new_name = new_name.into();
        let name_key = self.inner.normalizer.normalize(&new_name);

        let mut guard = self.inner.players.write();
        let maps = &mut *guard;

        let Some(entry) = maps.by_guid.get_mut(&guid) else {
            return Err(RenameError::UnknownGuid(guid));
        };

        if let Some(&owner) = maps.by_name.get(&name_key) {
            if owner != guid {
                return Err(RenameError::NameTaken(new_name));
            }
        }

        if maps.by_name.get(&entry.name_key) == Some(&guid) {
            maps.by_name.remove(&entry.name_key);
        }

        entry.name = new_name;
        entry.name_key = name_key.clone();
        maps.by_name.insert(name_key, guid);

        tracing::debug!("renamed player {}", guid);

        Ok(())
    }

    /// Returns the registered display name of a player.
    pub fn display_name(&self, guid: Guid) -> Option<String> {
        let maps = self.inner.players.read();
        maps.by_guid.get(&guid).map(|entry| entry.name.clone())
    }

    /// Returns a point-in-time copy of all registered players, ordered by
    /// GUID.
    ///
    /// Per-entity work on the result (saving, kicking) happens without the
    /// directory lock held.
    pub fn snapshot(&self) -> Vec<Arc<Player>> {
        let mut players: Vec<_> = {
            let maps = self.inner.players.read();
            maps.by_guid
                .values()
                .map(|entry| entry.player.clone())
                .collect()
        };

        players.sort_unstable_by_key(|player| player.guid());
        players
    }

    pub fn contains(&self, guid: Guid) -> bool {
        let maps = self.inner.players.read();
        maps.by_guid.contains_key(&guid)
    }

    pub fn len(&self) -> usize {
        let maps = self.inner.players.read();
        debug_assert_eq!(maps.by_guid.len(), maps.by_name.len());
        maps.by_guid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Debug for EntityDirectory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityDirectory")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
