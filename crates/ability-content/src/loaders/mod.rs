//! Content loaders for reading catalogs from RON files.
//!
//! Each loader parses one catalog shape; [`ContentFactory`] ties them to a
//! data directory and assembles a [`crate::ContentLibrary`].

pub mod ability;
pub mod attribute;
pub mod effect;
pub mod factory;

pub use ability::{AbilityCatalog, AbilityLoader};
pub use attribute::{AttributeCatalog, AttributeLoader};
pub use effect::{EffectCatalog, EffectLoader};
pub use factory::ContentFactory;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
