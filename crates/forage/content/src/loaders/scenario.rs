//! Scenario loader.

use std::path::{Path, PathBuf};

use crate::loaders::{LoadResult, read_file};
use crate::scenario::Scenario;

/// Loader for session scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Load a scenario. A relative world path is resolved against the
    /// directory of the scenario file.
    pub fn load(path: &Path) -> LoadResult<(Scenario, Option<PathBuf>)> {
        let content = read_file(path)?;
        let scenario: Scenario = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;

        if scenario.monsters.is_empty() {
            anyhow::bail!("Scenario {} has no monsters", path.display());
        }

        let world = scenario.world.as_ref().map(|world| {
            let world = Path::new(world);
            match path.parent() {
                Some(dir) if world.is_relative() => dir.join(world),
                _ => world.to_path_buf(),
            }
        });

        tracing::debug!(
            path = %path.display(),
            monsters = scenario.monsters.len(),
            "loaded scenario"
        );
        Ok((scenario, world))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::BrainKind;
    use tempfile::TempDir;

    #[test]
    fn resolves_world_relative_to_scenario() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("duel.ron");
        std::fs::write(
            &path,
            r#"(
                world: Some("lake.world"),
                monsters: [
                    (name: "Scout", brain: Explorer),
                    (name: "Grazer", brain: Forager),
                ],
            )"#,
        )
        .unwrap();

        let (scenario, world) = ScenarioLoader::load(&path).unwrap();
        assert_eq!(scenario.monsters.len(), 2);
        assert_eq!(scenario.monsters[0].brain, BrainKind::Explorer);
        assert_eq!(world, Some(dir.path().join("lake.world")));
    }

    #[test]
    fn missing_world_uses_demo() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("solo.ron");
        std::fs::write(&path, r#"(monsters: [(name: "Solo", brain: Wanderer)])"#).unwrap();

        let (scenario, world) = ScenarioLoader::load(&path).unwrap();
        assert_eq!(scenario.monsters.len(), 1);
        assert_eq!(world, None);
    }

    #[test]
    fn empty_roster_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.ron");
        std::fs::write(&path, "(monsters: [])").unwrap();

        assert!(ScenarioLoader::load(&path).is_err());
    }
}
