//! Core data structures for collision configuration
//!
//! This crate provides the types that describe how map objects collide:
//! - `FlagRegistry` - Named collision flags with stable creation-order identity
//! - `PartInformation` - One collidable shape with its self flags and check mask
//! - `CollisionInformation` - An object's full collision profile (body flags + parts)
//! - `CollisionRecord` - Name-based external representation for saving profiles
//! - `CollisionLimits` - Capacity policy of the editing UI
//!
//! Nothing here simulates physics. These types only hold the configuration a
//! physics backend would consume.

mod collision;
mod error;
mod flag;
mod limits;
mod part;
mod record;

pub use collision::CollisionInformation;
pub use error::{CapacityKind, CollisionError};
pub use flag::{Flag, FlagId, FlagRegistry};
pub use limits::{CollisionLimits, MAX_FLAGS_PER_PART, MAX_PARTS, MAX_REGISTERED_FLAGS};
pub use part::{FlagSet, GeometryKind, PartInformation, Point};
pub use record::{CollisionRecord, PartRecord};
