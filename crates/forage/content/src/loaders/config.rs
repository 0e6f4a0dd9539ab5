//! Engine configuration loader.

use std::path::Path;

use forage_core::ForageConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for engine configuration from TOML files.
///
/// Keys missing from the file keep their default value.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate a [`ForageConfig`] from a TOML file.
    pub fn load(path: &Path) -> LoadResult<ForageConfig> {
        let content = read_file(path)?;
        let config = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), "loaded engine config");
        Ok(config)
    }

    /// Parse and validate configuration text.
    pub fn parse(content: &str) -> LoadResult<ForageConfig> {
        let config: ForageConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid config: {}", e))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forage_core::RewardPolicy;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse("energy_max = 80\nreward_policy = \"most_valuable\"\n")
            .unwrap();
        assert_eq!(config.energy_max, 80);
        assert_eq!(config.reward_policy, RewardPolicy::MostValuable);
        assert_eq!(config.smell_radius, ForageConfig::DEFAULT_SMELL_RADIUS);
    }

    #[test]
    fn food_table_can_be_overridden() {
        let config = ConfigLoader::parse(
            r#"
            [food]
            berry = { probability = 0.25, energy = 5 }
            apple = { probability = 0.25, energy = 10 }
            pear = { probability = 0.25, energy = 15 }
            melon = { probability = 0.25, energy = 40 }
            "#,
        )
        .unwrap();
        assert_eq!(config.food.melon.energy, 40);
    }

    #[test]
    fn invalid_probabilities_are_rejected() {
        let error = ConfigLoader::parse(
            r#"
            [food]
            berry = { probability = 0.9, energy = 5 }
            "#,
        )
        .unwrap_err();
        assert!(error.to_string().contains("Invalid config"));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "initial_food = 9").unwrap();
        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.initial_food, 9);
    }
}
