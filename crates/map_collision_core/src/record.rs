//! Name-based external representation of collision profiles
//!
//! In memory, parts refer to flags by [`FlagId`](crate::FlagId). Ids are only
//! meaningful inside one registry, so saved data refers to flags by name and
//! is resolved against a registry when loaded.

use crate::{
    CapacityKind, CollisionError, CollisionInformation, FlagRegistry, FlagSet, GeometryKind,
    PartInformation, Point, MAX_FLAGS_PER_PART,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Saved form of a [`CollisionInformation`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollisionRecord {
    #[serde(default)]
    pub dynamic: bool,
    #[serde(default)]
    pub high_speed: bool,
    #[serde(default)]
    pub fixed_rotation: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<PartRecord>,
}

/// Saved form of a [`PartInformation`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartRecord {
    #[serde(rename = "type", default)]
    pub geometry: GeometryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<Point>>,
    #[serde(default)]
    pub solid: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub self_flags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub check_mask: Vec<String>,
}

impl CollisionInformation {
    /// Convert to the saved form, naming flags through `registry`.
    ///
    /// References to flags the registry no longer knows are dropped.
    pub fn to_record(&self, registry: &FlagRegistry) -> CollisionRecord {
        CollisionRecord {
            dynamic: self.dynamic,
            high_speed: self.high_speed,
            fixed_rotation: self.fixed_rotation,
            parts: self
                .parts()
                .iter()
                .map(|part| PartRecord {
                    geometry: part.geometry_kind(),
                    points: part.points().map(<[Point]>::to_vec),
                    solid: part.solid(),
                    self_flags: flag_names(part.self_flags(), registry),
                    check_mask: flag_names(part.check_mask(), registry),
                })
                .collect(),
        }
    }

    /// Rebuild a profile from its saved form, resolving flag names in `registry`
    pub fn from_record(
        record: &CollisionRecord,
        registry: &FlagRegistry,
    ) -> Result<Self, CollisionError> {
        let mut info =
            CollisionInformation::with_body(record.dynamic, record.high_speed, record.fixed_rotation);
        for part_record in &record.parts {
            info.add_part(part_from_record(part_record, registry)?);
        }
        Ok(info)
    }
}

fn flag_names(set: &FlagSet, registry: &FlagRegistry) -> Vec<String> {
    set.iter()
        .filter_map(|id| match registry.name_of(id) {
            Some(name) => Some(name.to_string()),
            None => {
                warn!("Dropping reference to removed collision flag {}", id);
                None
            }
        })
        .collect()
}

fn part_from_record(
    record: &PartRecord,
    registry: &FlagRegistry,
) -> Result<PartInformation, CollisionError> {
    for (names, kind) in [
        (&record.self_flags, CapacityKind::SelfFlags),
        (&record.check_mask, CapacityKind::CheckMask),
    ] {
        if names.len() > MAX_FLAGS_PER_PART {
            return Err(CollisionError::CapacityExceeded {
                kind,
                max: MAX_FLAGS_PER_PART,
            });
        }
    }

    let mut part = PartInformation::with_geometry(record.geometry, record.points.clone())?;
    part.set_solid(record.solid);
    for name in &record.self_flags {
        let id = registry
            .id_of(name)
            .ok_or_else(|| CollisionError::UnknownFlag(name.clone()))?;
        part.add_to_self_flags(id)?;
    }
    for name in &record.check_mask {
        let id = registry
            .id_of(name)
            .ok_or_else(|| CollisionError::UnknownFlag(name.clone()))?;
        part.add_to_check_mask(id)?;
    }
    Ok(part)
}
