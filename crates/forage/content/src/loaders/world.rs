//! World layout loader.

use std::path::Path;

use forage_core::GridWorld;

use crate::loaders::{LoadResult, read_file};
use crate::world::parse_world;

/// Loader for plain-text world layouts.
pub struct WorldLoader;

impl WorldLoader {
    pub fn load(path: &Path) -> LoadResult<GridWorld> {
        let content = read_file(path)?;
        let world = parse_world(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse world {}: {}", path.display(), e))?;

        tracing::debug!(path = %path.display(), size = world.size(), "loaded world layout");
        Ok(world)
    }
}
