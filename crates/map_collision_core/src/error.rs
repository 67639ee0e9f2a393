//! Error type for collision configuration operations

use crate::GeometryKind;
use std::fmt;
use thiserror::Error;

/// The bounded collection that refused an insertion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityKind {
    /// Flags a part is tagged with
    SelfFlags,
    /// Flags a part tests against
    CheckMask,
    /// Parts of a single collision profile
    Parts,
    /// Flags known to the registry
    RegisteredFlags,
}

impl CapacityKind {
    /// Display name for UI messages
    pub fn display_name(&self) -> &'static str {
        match self {
            CapacityKind::SelfFlags => "self flags",
            CapacityKind::CheckMask => "check mask",
            CapacityKind::Parts => "parts",
            CapacityKind::RegisteredFlags => "collision flags",
        }
    }
}

impl fmt::Display for CapacityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Errors reported by the collision model and the editing workflow.
///
/// Every variant is a precondition failure: the operation that returned it
/// left all state unchanged. The `Display` text is meant to be shown to the
/// user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollisionError {
    #[error("Maximum number of {kind} ({max}) reached.")]
    CapacityExceeded { kind: CapacityKind, max: usize },

    #[error("A {kind} shape needs {} points, got {got}.", .kind.arity_description())]
    InvalidGeometry { kind: GeometryKind, got: usize },

    #[error("You can't delete the edit slot, it hasn't been added.")]
    ProtectedSlot,

    #[error("There is no part in slot {0}.")]
    UnknownSlot(usize),

    #[error("No object(s) selected! You need to select at least one object from the scene.")]
    NoSelection,

    #[error("Flag name can't be empty.")]
    EmptyFlagName,

    #[error("Found invalid characters in the name: {0}")]
    InvalidFlagName(String),

    #[error("The name '{0}' has already been used.")]
    DuplicateFlag(String),

    #[error("Unknown collision flag '{0}'.")]
    UnknownFlag(String),
}
