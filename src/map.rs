//! Spatial partition boundary
//!
//! Partitions ("maps") own the non-player entities and live entirely on the
//! simulation thread. This crate never reaches into their stores directly;
//! it goes through the [`Partition`] trait, one GUID-keyed lookup per kind.

use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::entity::WorldEntity;
use crate::guid::Guid;

/// Identifier of a spatial partition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[repr(transparent)]
pub struct MapId(pub u32);

/// A spatial partition's lookup surface.
///
/// Every method answers "is this entity materialized *here, right now*";
/// a miss is a normal result, not an error. Implementations are confined to
/// the simulation thread and need no internal synchronization.
///
/// Vehicles live in the creature store, transports in their own store.
/// The rarely populated stores default to empty.
pub trait Partition {
    fn id(&self) -> MapId;

    fn creature(&self, guid: Guid) -> Option<Arc<dyn WorldEntity>>;

    fn game_object(&self, guid: Guid) -> Option<Arc<dyn WorldEntity>>;

    fn pet(&self, guid: Guid) -> Option<Arc<dyn WorldEntity>> {
        let _ = guid;
        None
    }

    fn dynamic_object(&self, guid: Guid) -> Option<Arc<dyn WorldEntity>> {
        let _ = guid;
        None
    }

    fn area_trigger(&self, guid: Guid) -> Option<Arc<dyn WorldEntity>> {
        let _ = guid;
        None
    }

    fn corpse(&self, guid: Guid) -> Option<Arc<dyn WorldEntity>> {
        let _ = guid;
        None
    }

    fn scene_object(&self, guid: Guid) -> Option<Arc<dyn WorldEntity>> {
        let _ = guid;
        None
    }

    fn conversation(&self, guid: Guid) -> Option<Arc<dyn WorldEntity>> {
        let _ = guid;
        None
    }

    fn transport(&self, guid: Guid) -> Option<Arc<dyn WorldEntity>> {
        let _ = guid;
        None
    }
}
