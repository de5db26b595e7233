//! Ability catalog loader.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::definitions::AbilityDefinition;
use crate::loaders::{LoadResult, read_file};

/// Ability catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityCatalog {
    pub abilities: Vec<AbilityDefinition>,
}

/// Loader for ability catalogs from RON files.
pub struct AbilityLoader;

impl AbilityLoader {
    /// Load ability catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing AbilityCatalog
    pub fn load(path: &Path) -> LoadResult<Vec<AbilityDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse an ability catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<Vec<AbilityDefinition>> {
        let catalog: AbilityCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse ability catalog RON: {}", e))?;

        Ok(catalog.abilities)
    }
}

#[cfg(test)]
mod tests {
    use ability_system::AbilityFlags;

    use super::*;

    #[test]
    fn parses_flags_and_optional_fields() {
        let abilities = AbilityLoader::parse(
            r#"(
                abilities: [
                    (
                        tag: "ability.block",
                        flags: ("AUTO_ACTIVATE_ON_INPUT_STARTED | AUTO_FINISH_ON_INPUT_COMPLETED"),
                        input_action: Some("input.block"),
                    ),
                    (tag: "ability.taunt", cooldown: 8.0, level: 3),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(abilities.len(), 2);
        assert!(abilities[0].flags.contains(
            AbilityFlags::AUTO_ACTIVATE_ON_INPUT_STARTED
                | AbilityFlags::AUTO_FINISH_ON_INPUT_COMPLETED
        ));
        assert_eq!(abilities[0].level, 1);
        assert!(!abilities[0].granted);
        assert_eq!(abilities[1].cooldown, 8.0);
        assert_eq!(abilities[1].level, 3);
    }

    #[test]
    fn reports_parse_errors() {
        let error = AbilityLoader::parse("(abilities: [(cooldown: 1.0)])").unwrap_err();
        assert!(error.to_string().contains("ability catalog"));
    }
}
