//! Attribute catalog loader.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::definitions::AttributeDefinition;
use crate::loaders::{LoadResult, read_file};

/// Attribute catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeCatalog {
    pub attributes: Vec<AttributeDefinition>,
}

/// Loader for attribute catalogs from RON files.
pub struct AttributeLoader;

impl AttributeLoader {
    /// Load attribute catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing AttributeCatalog
    pub fn load(path: &Path) -> LoadResult<Vec<AttributeDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse an attribute catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<Vec<AttributeDefinition>> {
        let catalog: AttributeCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse attribute catalog RON: {}", e))?;

        Ok(catalog.attributes)
    }
}
