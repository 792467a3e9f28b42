//! Typed entity identifiers
//!
//! A [`Guid`] addresses any object in the world. It packs a kind tag into the
//! high bits and a per-kind unique value into the low bits, so equality and
//! ordering over the full bit pattern are well defined across kinds.

use std::fmt::{self, Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The kind tag embedded in a [`Guid`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum GuidKind {
    Player = 0,
    Creature = 1,
    GameObject = 2,
    Vehicle = 3,
    Pet = 4,
    DynamicObject = 5,
    AreaTrigger = 6,
    Corpse = 7,
    SceneObject = 8,
    Conversation = 9,
    Transport = 10,
    Item = 11,
}

impl GuidKind {
    pub(crate) const fn from_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            0 => Self::Player,
            1 => Self::Creature,
            2 => Self::GameObject,
            3 => Self::Vehicle,
            4 => Self::Pet,
            5 => Self::DynamicObject,
            6 => Self::AreaTrigger,
            7 => Self::Corpse,
            8 => Self::SceneObject,
            9 => Self::Conversation,
            10 => Self::Transport,
            11 => Self::Item,
            _ => return None,
        })
    }

    /// Returns `true` if an entity of this kind may be treated as `cap`.
    ///
    /// The kind alone decides the capability set, so the check never needs
    /// to touch the entity itself.
    pub const fn supports(self, cap: Capability) -> bool {
        match (self, cap) {
            (Self::Player, Capability::Player | Capability::Unit) => true,
            (Self::Creature | Self::Pet | Self::Vehicle, Capability::Unit) => true,
            (Self::GameObject | Self::Transport, Capability::GameObject) => true,
            (Self::DynamicObject, Capability::DynamicObject) => true,
            (Self::AreaTrigger, Capability::AreaTrigger) => true,
            (Self::SceneObject, Capability::SceneObject) => true,
            (Self::Conversation, Capability::Conversation) => true,
            (Self::Item, Capability::Item) => true,
            _ => false,
        }
    }
}

/// A capability a caller may require from a resolved entity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    Item,
    Player,
    Unit,
    GameObject,
    DynamicObject,
    AreaTrigger,
    SceneObject,
    Conversation,
}

/// A unique identifier for an object in the world.
///
/// The high 8 bits carry the [`GuidKind`] tag, the low 56 bits the value
/// unique within that kind. A `Guid` is immutable once assigned.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[repr(transparent)]
pub struct Guid(u64);

// Deserialization goes through `from_bits` so an unknown kind tag is a
// decode error instead of a `Guid` that panics in `kind()`.
#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Guid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u64::deserialize(deserializer)?;
        Self::from_bits(bits).ok_or_else(|| serde::de::Error::custom("Guid with invalid kind tag"))
    }
}

impl Guid {
    const MASK_KIND: u64 = 0xFF00_0000_0000_0000;
    const MASK_LOW: u64 = 0x00FF_FFFF_FFFF_FFFF;

    /// Creates a new `Guid` from the given parts.
    ///
    /// `low` is truncated to 56 bits.
    #[inline]
    pub const fn new(kind: GuidKind, low: u64) -> Self {
        Self(((kind as u64) << 56) | (low & Self::MASK_LOW))
    }

    /// Returns the kind tag of this `Guid`.
    #[inline]
    pub const fn kind(self) -> GuidKind {
        match GuidKind::from_tag(((self.0 & Self::MASK_KIND) >> 56) as u8) {
            Some(kind) => kind,
            // Unreachable: every constructor validates the tag.
            None => panic!("Guid with invalid kind tag"),
        }
    }

    /// Returns the low value of this `Guid`, unique within its kind.
    #[inline]
    pub const fn low(self) -> u64 {
        self.0 & Self::MASK_LOW
    }

    #[inline]
    pub const fn to_bits(self) -> u64 {
        self.0
    }

    /// Reconstructs a `Guid` from its raw bit pattern.
    ///
    /// Returns `None` if the kind tag is unknown, e.g. when the bits came
    /// from a newer peer or a retired kind.
    #[inline]
    pub const fn from_bits(bits: u64) -> Option<Self> {
        match GuidKind::from_tag(((bits & Self::MASK_KIND) >> 56) as u8) {
            Some(_) => Some(Self(bits)),
            None => None,
        }
    }
}

impl Display for Guid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.kind(), self.low())
    }
}

#[cfg(test)]
mod tests {
    use super::{Capability, Guid, GuidKind};

    #[test]
    fn guid_parts() {
        let guid = Guid::new(GuidKind::Creature, 1337);
        assert_eq!(guid.kind(), GuidKind::Creature);
        assert_eq!(guid.low(), 1337);
        assert_eq!(guid.to_bits(), (1 << 56) + 1337);
    }

    #[test]
    fn guid_low_truncated() {
        let guid = Guid::new(GuidKind::Player, u64::MAX);
        assert_eq!(guid.kind(), GuidKind::Player);
        assert_eq!(guid.low(), (1 << 56) - 1);
    }

    #[test]
    fn guid_ordering_by_bits() {
        let a = Guid::new(GuidKind::Player, 500);
        let b = Guid::new(GuidKind::Creature, 1);
        assert!(a < b);
        assert_ne!(a, b);
    }

    #[test]
    fn guid_from_bits() {
        let guid = Guid::new(GuidKind::Transport, 7);
        assert_eq!(Guid::from_bits(guid.to_bits()), Some(guid));

        // Tag 200 was never assigned.
        assert_eq!(Guid::from_bits(200 << 56), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn guid_deserialize_validates_tag() {
        use serde::de::value::{Error, U64Deserializer};
        use serde::Deserialize;

        let guid = Guid::new(GuidKind::Creature, 9);
        let bits = U64Deserializer::<Error>::new(guid.to_bits());
        assert_eq!(Guid::deserialize(bits), Ok(guid));

        // Tag 200 was never assigned; decoding must fail instead of
        // producing a Guid with an invalid tag.
        let bits = U64Deserializer::<Error>::new(200 << 56);
        assert!(Guid::deserialize(bits).is_err());
    }

    #[test]
    fn kind_capabilities() {
        assert!(GuidKind::Player.supports(Capability::Unit));
        assert!(GuidKind::Player.supports(Capability::Player));
        assert!(GuidKind::Creature.supports(Capability::Unit));
        assert!(GuidKind::Vehicle.supports(Capability::Unit));
        assert!(GuidKind::Transport.supports(Capability::GameObject));

        assert!(!GuidKind::Creature.supports(Capability::Player));
        assert!(!GuidKind::GameObject.supports(Capability::Unit));
        assert!(!GuidKind::Corpse.supports(Capability::Unit));
    }
}
