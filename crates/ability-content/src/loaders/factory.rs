//! Content factory for building a library from data files.

use std::path::{Path, PathBuf};

use crate::definitions::{AbilityDefinition, AttributeDefinition, EffectDefinition};
use crate::library::ContentLibrary;
use crate::loaders::{AbilityLoader, AttributeLoader, EffectLoader, LoadResult};

/// Content factory that loads every catalog from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── abilities.ron
/// ├── effects.ron
/// └── attributes.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the directory containing data files
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load ability catalog from `abilities.ron`.
    pub fn load_abilities(&self) -> LoadResult<Vec<AbilityDefinition>> {
        AbilityLoader::load(&self.data_dir.join("abilities.ron"))
    }

    /// Load effect catalog from `effects.ron`.
    pub fn load_effects(&self) -> LoadResult<Vec<EffectDefinition>> {
        EffectLoader::load(&self.data_dir.join("effects.ron"))
    }

    /// Load attribute catalog from `attributes.ron`.
    pub fn load_attributes(&self) -> LoadResult<Vec<AttributeDefinition>> {
        AttributeLoader::load(&self.data_dir.join("attributes.ron"))
    }

    /// Load all three catalogs and cross-check them.
    pub fn load_library(&self) -> LoadResult<ContentLibrary> {
        let library = ContentLibrary::new(
            self.load_abilities()?,
            self.load_effects()?,
            self.load_attributes()?,
        )?;

        tracing::info!(
            data_dir = %self.data_dir.display(),
            abilities = library.abilities().count(),
            effects = library.effects().count(),
            attributes = library.attributes().count(),
            "Loaded ability content"
        );
        Ok(library)
    }
}
