//! Per-object collision profile

use crate::{FlagId, PartInformation};

/// An object's full collision profile: body settings plus its parts.
///
/// The number of parts is not capped here. Edit sessions are the only normal
/// way parts get added, and they keep every profile within the slot limit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionInformation {
    /// Body is moved by the physics simulation
    pub dynamic: bool,
    /// Body needs continuous collision detection (fast-moving bullets etc.)
    pub high_speed: bool,
    /// Body never rotates
    pub fixed_rotation: bool,
    parts: Vec<PartInformation>,
}

impl CollisionInformation {
    /// Create an empty profile
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty profile with the given body settings
    pub fn with_body(dynamic: bool, high_speed: bool, fixed_rotation: bool) -> Self {
        Self {
            dynamic,
            high_speed,
            fixed_rotation,
            parts: Vec::new(),
        }
    }

    pub fn parts(&self) -> &[PartInformation] {
        &self.parts
    }

    /// Mutable access to the parts; the slice keeps the part count fixed
    pub fn parts_mut(&mut self) -> &mut [PartInformation] {
        &mut self.parts
    }

    pub fn part(&self, index: usize) -> Option<&PartInformation> {
        self.parts.get(index)
    }

    pub fn part_mut(&mut self, index: usize) -> Option<&mut PartInformation> {
        self.parts.get_mut(index)
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Whether the profile has no parts
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Append a part
    pub fn add_part(&mut self, part: PartInformation) {
        self.parts.push(part);
    }

    /// Remove the part at `index`
    pub fn remove_part(&mut self, index: usize) -> Option<PartInformation> {
        if index < self.parts.len() {
            Some(self.parts.remove(index))
        } else {
            None
        }
    }

    /// Whether any part references `flag`
    pub fn references_flag(&self, flag: FlagId) -> bool {
        self.parts.iter().any(|p| p.references_flag(flag))
    }

    /// Drop `flag` from every part. Returns the number of parts that changed.
    pub fn remove_flag(&mut self, flag: FlagId) -> usize {
        self.parts
            .iter_mut()
            .map(|p| p.remove_flag(flag))
            .filter(|&removed| removed)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FlagRegistry, GeometryKind};

    fn sample(registry: &mut FlagRegistry) -> CollisionInformation {
        let ground = registry.register("ground");
        let player = registry.register("player");

        let mut info = CollisionInformation::with_body(true, false, true);
        let mut feet = PartInformation::with_geometry(
            GeometryKind::Box,
            Some(vec![[0.0, 0.0], [16.0, 4.0]]),
        )
        .unwrap();
        feet.add_to_self_flags(player).unwrap();
        feet.add_to_check_mask(ground).unwrap();
        feet.set_solid(true);
        info.add_part(feet);

        let mut body = PartInformation::new();
        body.set_geometry_kind(GeometryKind::Sphere);
        body.add_to_self_flags(player).unwrap();
        info.add_part(body);
        info
    }

    #[test]
    fn test_add_and_remove_parts() {
        let mut info = CollisionInformation::new();
        assert!(info.is_empty());

        info.add_part(PartInformation::new());
        let mut sphere = PartInformation::new();
        sphere.set_geometry_kind(GeometryKind::Sphere);
        info.add_part(sphere);
        assert_eq!(info.part_count(), 2);

        let removed = info.remove_part(0).unwrap();
        assert_eq!(removed.geometry_kind(), GeometryKind::Box);
        assert_eq!(info.part_count(), 1);
        assert_eq!(info.parts()[0].geometry_kind(), GeometryKind::Sphere);

        assert!(info.remove_part(5).is_none());
        assert_eq!(info.part_count(), 1);
    }

    #[test]
    fn test_clone_is_structurally_independent() {
        let mut registry = FlagRegistry::new();
        let original = sample(&mut registry);
        let ground = registry.id_of("ground").unwrap();

        let mut copy = original.clone();
        assert_eq!(copy, original);
        assert_eq!(copy.dynamic, original.dynamic);
        assert_eq!(copy.fixed_rotation, original.fixed_rotation);

        // Flag references are the same identities
        assert_eq!(
            copy.parts()[0].check_mask().as_slice(),
            original.parts()[0].check_mask().as_slice()
        );

        // Mutating the copy leaves the original alone
        copy.part_mut(0).unwrap().remove_flag(ground);
        copy.part_mut(1).unwrap().set_solid(true);
        copy.remove_part(1);
        copy.dynamic = false;

        assert!(original.parts()[0].check_mask().contains(ground));
        assert!(!original.parts()[1].solid());
        assert_eq!(original.part_count(), 2);
        assert!(original.dynamic);
    }

    #[test]
    fn test_remove_flag_counts_changed_parts() {
        let mut registry = FlagRegistry::new();
        let mut info = sample(&mut registry);
        let player = registry.id_of("player").unwrap();
        let ground = registry.id_of("ground").unwrap();

        assert!(info.references_flag(player));
        assert_eq!(info.remove_flag(player), 2);
        assert!(!info.references_flag(player));
        assert_eq!(info.remove_flag(player), 0);
        assert!(info.references_flag(ground));
    }
}
