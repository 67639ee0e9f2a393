//! Collision project - flags and per-object profiles in one saveable bundle
//!
//! Flags are stored by name in creation order, and profiles refer to flags by
//! name, so a project can be loaded into a fresh registry.

mod file;

pub use file::*;

use crate::store::{ObjectId, SceneObject, SceneObjects};
use map_collision_core::{CollisionError, CollisionInformation, CollisionRecord, FlagRegistry};
use serde::{Deserialize, Serialize};

/// Saved collision data of one scene object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectRecord {
    pub id: ObjectId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collision: Option<CollisionRecord>,
}

/// Saveable snapshot of the flag registry and every object's profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollisionProject {
    /// Format version for future compatibility
    pub version: u32,
    /// Flag names in creation order
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default)]
    pub objects: Vec<ObjectRecord>,
}

impl Default for CollisionProject {
    fn default() -> Self {
        Self {
            version: 1,
            flags: Vec::new(),
            objects: Vec::new(),
        }
    }
}

impl CollisionProject {
    /// Snapshot a registry and scene
    pub fn capture(registry: &FlagRegistry, scene: &SceneObjects) -> Self {
        Self {
            version: 1,
            flags: registry.iter().map(|f| f.name().to_string()).collect(),
            objects: scene
                .iter()
                .map(|object| ObjectRecord {
                    id: object.id,
                    name: object.name.clone(),
                    collision: object
                        .collision
                        .as_ref()
                        .map(|info| info.to_record(registry)),
                })
                .collect(),
        }
    }

    /// Rebuild a registry and scene from the snapshot.
    ///
    /// Flags get fresh ids in saved order.
    pub fn restore(&self) -> Result<(FlagRegistry, SceneObjects), CollisionError> {
        let mut registry = FlagRegistry::new();
        for name in &self.flags {
            registry.register(name);
        }

        let mut scene = SceneObjects::new();
        for record in &self.objects {
            let collision = record
                .collision
                .as_ref()
                .map(|c| CollisionInformation::from_record(c, &registry))
                .transpose()?;
            scene.add(SceneObject {
                id: record.id,
                name: record.name.clone(),
                collision,
            });
        }
        Ok((registry, scene))
    }
}
