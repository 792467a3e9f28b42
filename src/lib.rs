//! In-memory entity identity and resolution.
//!
//! This crate is the identity layer of the server: it maps opaque typed
//! identifiers ([`Guid`]s) to live entities. The [`EntityDirectory`] is the
//! authoritative registry of connected players and is safe to touch from any
//! thread; everything else (resolver dispatch, spawn bookkeeping, name
//! interning) is confined to the simulation tick and carries no locks.
//!
//! [`Guid`]: crate::guid::Guid
//! [`EntityDirectory`]: crate::directory::EntityDirectory

pub mod directory;
pub mod entity;
pub mod guid;
pub mod interner;
pub mod map;
pub mod name;
pub mod resolver;
pub mod spawn;
pub mod sweep;
