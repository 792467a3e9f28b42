//! Display name canonicalization
//!
//! The directory never keys its name index on raw display names; every name
//! passes through a [`NameNormalizer`] first. The real, locale-aware service
//! lives outside this crate; [`CaseFolding`] is the stand-in boundary impl.

/// Canonicalizes a raw display name before it is used as an index key.
pub trait NameNormalizer: Send + Sync {
    fn normalize(&self, name: &str) -> String;
}

/// Unicode case folding with surrounding whitespace stripped.
#[derive(Copy, Clone, Debug, Default)]
pub struct CaseFolding;

impl NameNormalizer for CaseFolding {
    fn normalize(&self, name: &str) -> String {
        name.trim().to_lowercase()
    }
}
