//! Entity

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;

use crate::guid::{Guid, GuidKind};
use crate::map::MapId;

/// An object addressable by [`Guid`].
///
/// Every entity reports the partition it currently lives on (`None` while it
/// is in limbo between two partitions) and whether it is active in the world.
pub trait WorldEntity: Send + Sync {
    fn guid(&self) -> Guid;

    /// The partition currently owning this entity, if any.
    fn map(&self) -> Option<MapId>;

    /// Whether the entity is active in the world.
    ///
    /// An entity that exists but is not in world (mid-transfer, logging in)
    /// must not be handed out by scoped lookups.
    fn is_in_world(&self) -> bool;
}

/// A connected player.
///
/// The partition slot and the in-world flag are written by the simulation
/// thread while directory readers on other threads observe them, hence the
/// interior mutability.
#[derive(Debug)]
pub struct Player {
    guid: Guid,
    map: RwLock<Option<MapId>>,
    in_world: AtomicBool,
}

impl Player {
    pub fn new(guid: Guid) -> Self {
        debug_assert_eq!(guid.kind(), GuidKind::Player);

        Self {
            guid,
            map: RwLock::new(None),
            in_world: AtomicBool::new(false),
        }
    }

    #[inline]
    pub fn guid(&self) -> Guid {
        self.guid
    }

    pub fn set_map(&self, map: MapId) {
        *self.map.write() = Some(map);
    }

    /// Detaches the player from its partition (limbo during transfer).
    pub fn clear_map(&self) {
        *self.map.write() = None;
    }

    pub fn set_in_world(&self, in_world: bool) {
        // Published after the map slot is written; paired with the Acquire
        // load in `is_in_world`.
        self.in_world.store(in_world, Ordering::Release);
    }
}

impl WorldEntity for Player {
    #[inline]
    fn guid(&self) -> Guid {
        self.guid
    }

    fn map(&self) -> Option<MapId> {
        *self.map.read()
    }

    fn is_in_world(&self) -> bool {
        self.in_world.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use crate::guid::{Guid, GuidKind};
    use crate::map::MapId;

    use super::{Player, WorldEntity};

    #[test]
    fn player_transfer_window() {
        let player = Player::new(Guid::new(GuidKind::Player, 1));
        assert_eq!(player.map(), None);
        assert!(!player.is_in_world());

        player.set_map(MapId(3));
        player.set_in_world(true);
        assert_eq!(player.map(), Some(MapId(3)));
        assert!(player.is_in_world());

        player.set_in_world(false);
        player.clear_map();
        assert_eq!(player.map(), None);
        assert!(!player.is_in_world());
    }
}
