//! GUID dispatch
//!
//! Resolution is stateless: a [`ResolveContext`] borrows the directory and
//! the partition the caller is currently simulating, and every lookup
//! switches on the GUID's kind tag. A dead, despawned or foreign GUID
//! resolves to `None`; that is a normal outcome, never an error.

use std::sync::Arc;

use crate::directory::EntityDirectory;
use crate::entity::{Player, WorldEntity};
use crate::guid::{Capability, Guid, GuidKind};
use crate::map::Partition;

/// The lookup scope of one resolution: the global player directory plus the
/// partition the calling code is ticking.
#[derive(Copy, Clone)]
pub struct ResolveContext<'a> {
    directory: &'a EntityDirectory,
    map: &'a dyn Partition,
}

impl<'a> ResolveContext<'a> {
    pub fn new(directory: &'a EntityDirectory, map: &'a dyn Partition) -> Self {
        Self { directory, map }
    }

    /// Resolves a GUID to the live entity it addresses, if it is present in
    /// this context's partition right now.
    ///
    /// Players go through the directory's scoped lookup; everything else is
    /// answered by the partition's per-kind stores. Items are not owned by
    /// partitions and always resolve to `None` here.
    pub fn resolve(&self, guid: Guid) -> Option<Arc<dyn WorldEntity>> {
        match guid.kind() {
            GuidKind::Player => self
                .resolve_player(guid)
                .map(|player| player as Arc<dyn WorldEntity>),
            GuidKind::Creature | GuidKind::Vehicle => self.map.creature(guid),
            GuidKind::Pet => self.map.pet(guid),
            GuidKind::GameObject => self.map.game_object(guid),
            GuidKind::Transport => self.map.transport(guid),
            GuidKind::DynamicObject => self.map.dynamic_object(guid),
            GuidKind::AreaTrigger => self.map.area_trigger(guid),
            GuidKind::Corpse => self.map.corpse(guid),
            GuidKind::SceneObject => self.map.scene_object(guid),
            GuidKind::Conversation => self.map.conversation(guid),
            GuidKind::Item => None,
        }
    }

    /// As [`resolve`], but additionally requires the resolved entity's kind
    /// to support `cap`.
    ///
    /// [`resolve`]: Self::resolve
    pub fn resolve_with_capability(
        &self,
        guid: Guid,
        cap: Capability,
    ) -> Option<Arc<dyn WorldEntity>> {
        if !guid.kind().supports(cap) {
            return None;
        }

        self.resolve(guid)
    }

    /// Resolves a GUID that must address a unit (player, creature, pet or
    /// vehicle).
    pub fn resolve_unit(&self, guid: Guid) -> Option<Arc<dyn WorldEntity>> {
        self.resolve_with_capability(guid, Capability::Unit)
    }

    /// Resolves a GUID to a player present in this context's partition.
    pub fn resolve_player(&self, guid: Guid) -> Option<Arc<Player>> {
        if guid.kind() != GuidKind::Player {
            return None;
        }

        self.directory.find_by_guid_scoped(self.map.id(), guid)
    }
}
