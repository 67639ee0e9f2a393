//! Collision project file save/load operations

use super::CollisionProject;
use crate::store::SceneObjects;
use map_collision_core::{CollisionError, FlagRegistry};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Serialize error: {0}")]
    SerializeError(String),
    #[error("Invalid collision data: {0}")]
    InvalidData(#[from] CollisionError),
}

impl CollisionProject {
    /// Load project from file
    pub fn load(path: &Path) -> Result<Self, ProjectError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ProjectError::IoError(e.to_string()))?;

        serde_json::from_str(&content).map_err(|e| ProjectError::ParseError(e.to_string()))
    }

    /// Save project to file
    pub fn save(&self, path: &Path) -> Result<(), ProjectError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ProjectError::SerializeError(e.to_string()))?;

        std::fs::write(path, content).map_err(|e| ProjectError::IoError(e.to_string()))?;

        info!(
            "Saved {} flag(s) and {} object(s) to {:?}",
            self.flags.len(),
            self.objects.len(),
            path
        );
        Ok(())
    }

    /// Load a project file straight into a registry and scene
    pub fn load_scene(path: &Path) -> Result<(FlagRegistry, SceneObjects), ProjectError> {
        let project = Self::load(path)?;
        Ok(project.restore()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ObjectStore, SceneObject};
    use map_collision_core::{CollisionInformation, PartInformation};

    #[test]
    fn test_save_and_load_scene() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("level1.collision.json");

        let mut registry = FlagRegistry::new();
        let ground = registry.register("ground");
        let mut part = PartInformation::new();
        part.add_to_self_flags(ground).unwrap();
        let mut info = CollisionInformation::new();
        info.add_part(part);
        let mut scene = SceneObjects::new();
        let floor = scene.add(SceneObject::new("Floor".to_string()).with_collision(info));

        CollisionProject::capture(&registry, &scene)
            .save(&path)
            .unwrap();

        let (registry, scene) = CollisionProject::load_scene(&path).unwrap();
        let ground = registry.id_of("ground").unwrap();
        assert!(scene.collision_info(floor).unwrap().references_flag(ground));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = CollisionProject::load(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(ProjectError::IoError(_))));
    }
}
