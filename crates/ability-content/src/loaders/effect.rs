//! Effect catalog loader.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::definitions::EffectDefinition;
use crate::loaders::{LoadResult, read_file};

/// Effect catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectCatalog {
    pub effects: Vec<EffectDefinition>,
}

/// Loader for effect catalogs from RON files.
pub struct EffectLoader;

impl EffectLoader {
    /// Load effect catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing EffectCatalog
    pub fn load(path: &Path) -> LoadResult<Vec<EffectDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse an effect catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<Vec<EffectDefinition>> {
        let catalog: EffectCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse effect catalog RON: {}", e))?;

        Ok(catalog.effects)
    }
}
