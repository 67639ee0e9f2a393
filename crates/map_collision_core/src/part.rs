//! Collision parts: one collidable shape attached to an object

use crate::{CapacityKind, CollisionError, FlagId, MAX_FLAGS_PER_PART};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 2D point of a part's geometry, in object-local pixels
pub type Point = [f32; 2];

/// Shape of a collision part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryKind {
    /// Axis-aligned box given by two corners
    #[default]
    Box,
    /// Circle given by center and a point on the rim
    Sphere,
    /// Polygon with three or more vertices
    Mesh,
}

impl GeometryKind {
    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            GeometryKind::Box => "Box",
            GeometryKind::Sphere => "Sphere",
            GeometryKind::Mesh => "Mesh",
        }
    }

    /// All geometry kinds for UI radio groups
    pub fn all() -> &'static [GeometryKind] {
        &[GeometryKind::Box, GeometryKind::Sphere, GeometryKind::Mesh]
    }

    /// Whether `count` points describe a shape of this kind
    pub fn accepts_point_count(&self, count: usize) -> bool {
        match self {
            GeometryKind::Box | GeometryKind::Sphere => count == 2,
            GeometryKind::Mesh => count >= 3,
        }
    }

    /// Human-readable point count rule, used in error messages
    pub fn arity_description(&self) -> &'static str {
        match self {
            GeometryKind::Box | GeometryKind::Sphere => "exactly 2",
            GeometryKind::Mesh => "at least 3",
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Ordered set of flag references, capped at [`MAX_FLAGS_PER_PART`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagSet(Vec<FlagId>);

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.0.len() >= MAX_FLAGS_PER_PART
    }

    pub fn contains(&self, id: FlagId) -> bool {
        self.0.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = FlagId> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[FlagId] {
        &self.0
    }

    /// Append `id`. Returns `Ok(false)` if it was already present.
    fn insert(&mut self, id: FlagId, kind: CapacityKind) -> Result<bool, CollisionError> {
        if self.contains(id) {
            return Ok(false);
        }
        if self.is_full() {
            return Err(CollisionError::CapacityExceeded {
                kind,
                max: MAX_FLAGS_PER_PART,
            });
        }
        self.0.push(id);
        Ok(true)
    }

    fn remove(&mut self, id: FlagId) -> bool {
        match self.0.iter().position(|&f| f == id) {
            Some(pos) => {
                self.0.remove(pos);
                true
            }
            None => false,
        }
    }

    fn toggle(&mut self, id: FlagId, kind: CapacityKind) -> Result<bool, CollisionError> {
        if self.remove(id) {
            Ok(false)
        } else {
            self.insert(id, kind)
        }
    }
}

/// One collidable shape.
///
/// Flags are held by [`FlagId`], so cloning a part shares flag identity with
/// the source part while everything else is copied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartInformation {
    geometry: GeometryKind,
    points: Option<Vec<Point>>,
    solid: bool,
    self_flags: FlagSet,
    check_mask: FlagSet,
}

impl PartInformation {
    /// Create a blank box part with no points and no flags
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a part with the given geometry
    pub fn with_geometry(
        geometry: GeometryKind,
        points: Option<Vec<Point>>,
    ) -> Result<Self, CollisionError> {
        let mut part = Self {
            geometry,
            ..Default::default()
        };
        if let Some(points) = points {
            part.set_points(points)?;
        }
        Ok(part)
    }

    pub fn geometry_kind(&self) -> GeometryKind {
        self.geometry
    }

    pub fn points(&self) -> Option<&[Point]> {
        self.points.as_deref()
    }

    pub fn solid(&self) -> bool {
        self.solid
    }

    pub fn self_flags(&self) -> &FlagSet {
        &self.self_flags
    }

    pub fn check_mask(&self) -> &FlagSet {
        &self.check_mask
    }

    pub fn set_solid(&mut self, solid: bool) {
        self.solid = solid;
    }

    /// Change the shape. Points are always cleared, even when the kind is
    /// unchanged, and have to be supplied again.
    pub fn set_geometry_kind(&mut self, kind: GeometryKind) {
        self.geometry = kind;
        self.points = None;
    }

    /// Set the geometry points, checking them against the current kind
    pub fn set_points(&mut self, points: Vec<Point>) -> Result<(), CollisionError> {
        if !self.geometry.accepts_point_count(points.len()) {
            return Err(CollisionError::InvalidGeometry {
                kind: self.geometry,
                got: points.len(),
            });
        }
        self.points = Some(points);
        Ok(())
    }

    pub fn clear_points(&mut self) {
        self.points = None;
    }

    /// Tag this part with a flag. Returns `Ok(false)` if it already was.
    pub fn add_to_self_flags(&mut self, flag: FlagId) -> Result<bool, CollisionError> {
        self.self_flags.insert(flag, CapacityKind::SelfFlags)
    }

    /// Make this part test against a flag. Returns `Ok(false)` if it already did.
    pub fn add_to_check_mask(&mut self, flag: FlagId) -> Result<bool, CollisionError> {
        self.check_mask.insert(flag, CapacityKind::CheckMask)
    }

    pub fn remove_from_self_flags(&mut self, flag: FlagId) -> bool {
        self.self_flags.remove(flag)
    }

    pub fn remove_from_check_mask(&mut self, flag: FlagId) -> bool {
        self.check_mask.remove(flag)
    }

    /// Flip a self flag the way a toggle button does. Returns whether the
    /// flag is set afterwards.
    pub fn toggle_self_flag(&mut self, flag: FlagId) -> Result<bool, CollisionError> {
        self.self_flags.toggle(flag, CapacityKind::SelfFlags)
    }

    /// Flip a check mask flag. Returns whether the flag is set afterwards.
    pub fn toggle_check_mask(&mut self, flag: FlagId) -> Result<bool, CollisionError> {
        self.check_mask.toggle(flag, CapacityKind::CheckMask)
    }

    /// Whether either flag set references `flag`
    pub fn references_flag(&self, flag: FlagId) -> bool {
        self.self_flags.contains(flag) || self.check_mask.contains(flag)
    }

    /// Drop `flag` from both sets. Returns whether anything was removed.
    pub fn remove_flag(&mut self, flag: FlagId) -> bool {
        let in_self = self.self_flags.remove(flag);
        let in_mask = self.check_mask.remove(flag);
        in_self || in_mask
    }
}
