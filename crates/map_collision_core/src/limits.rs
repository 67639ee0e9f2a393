//! Capacity policy for collision editing
//!
//! The numbers here come from the editing UI's fixed layout (a 4x4 toggle grid
//! per flag set, eight part tabs), not from anything the physics side needs.

use serde::{Deserialize, Serialize};

/// Maximum number of flags in a part's self flags or check mask
pub const MAX_FLAGS_PER_PART: usize = 16;

/// Number of part slots per collision profile
pub const MAX_PARTS: usize = 8;

/// Default maximum number of flags the registry accepts from the flags editor
pub const MAX_REGISTERED_FLAGS: usize = 16;

/// Configurable capacity limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionLimits {
    /// How many flags the flags editor lets the user register
    #[serde(default = "default_max_flags")]
    pub max_flags: usize,

    /// How many part slots an edit session keeps per object
    #[serde(default = "default_max_parts")]
    pub max_parts: usize,
}

fn default_max_flags() -> usize {
    MAX_REGISTERED_FLAGS
}

fn default_max_parts() -> usize {
    MAX_PARTS
}

impl Default for CollisionLimits {
    fn default() -> Self {
        Self {
            max_flags: MAX_REGISTERED_FLAGS,
            max_parts: MAX_PARTS,
        }
    }
}
