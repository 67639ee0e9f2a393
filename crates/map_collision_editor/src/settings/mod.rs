//! Persistent editor settings
//!
//! Settings are stored as JSON in the platform config directory. Every field
//! has a default, so older or hand-edited files keep loading.

mod file;

pub use file::*;

use map_collision_core::CollisionLimits;
use serde::{Deserialize, Serialize};

/// Collision editor settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Capacity limits of the flags editor and part slots
    #[serde(default)]
    pub limits: CollisionLimits,
}
