//! Collision flags and the registry that owns them
//!
//! A flag is identified by its [`FlagId`], the creation index handed out at
//! registration. Indices grow monotonically and are never reused, so a part
//! holding an id of a removed flag can never end up pointing at a newer one.

use crate::{CapacityKind, CollisionError, CollisionLimits};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use tracing::debug;

/// Stable identity of a collision flag (its creation index)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlagId(u32);

impl FlagId {
    /// Creation index of the flag
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for FlagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A named collision flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    id: FlagId,
    name: String,
}

impl Flag {
    pub fn id(&self) -> FlagId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Ordered namespace of collision flags.
///
/// Removal is immediate: once a flag is removed, `lookup` no longer finds it
/// and `list` no longer returns it. Cleaning up the references parts still
/// hold is the job of the cascade in the editor.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
pub struct FlagRegistry {
    next_id: u32,
    flags: BTreeMap<FlagId, Flag>,
    by_name: HashMap<String, FlagId>,
}

impl FlagRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a flag, returning its id.
    ///
    /// Registering a name that already exists changes nothing and returns the
    /// existing id.
    pub fn register(&mut self, name: &str) -> FlagId {
        if let Some(&id) = self.by_name.get(name) {
            return id;
        }

        let id = FlagId(self.next_id);
        self.next_id += 1;
        self.flags.insert(
            id,
            Flag {
                id,
                name: name.to_string(),
            },
        );
        self.by_name.insert(name.to_string(), id);
        debug!("Registered collision flag '{}' as {}", name, id);
        id
    }

    /// Register a flag typed in by the user, enforcing the naming rules and
    /// the configured flag limit
    pub fn try_register(
        &mut self,
        name: &str,
        limits: &CollisionLimits,
    ) -> Result<FlagId, CollisionError> {
        if self.is_full(limits) {
            return Err(CollisionError::CapacityExceeded {
                kind: CapacityKind::RegisteredFlags,
                max: limits.max_flags,
            });
        }
        if self.by_name.contains_key(name) {
            return Err(CollisionError::DuplicateFlag(name.to_string()));
        }
        Self::validate_name(name)?;
        Ok(self.register(name))
    }

    /// Check that a flag name is non-empty and only uses ASCII letters and digits
    pub fn validate_name(name: &str) -> Result<(), CollisionError> {
        if name.is_empty() {
            return Err(CollisionError::EmptyFlagName);
        }
        let invalid: String = name
            .chars()
            .filter(|c| !c.is_ascii_alphanumeric())
            .collect();
        if invalid.is_empty() {
            Ok(())
        } else {
            Err(CollisionError::InvalidFlagName(invalid))
        }
    }

    /// Remove a flag by name. Returns the removed flag, or `None` if it was
    /// not registered.
    pub fn remove(&mut self, name: &str) -> Option<Flag> {
        let id = self.by_name.remove(name)?;
        let removed = self.flags.remove(&id);
        if removed.is_some() {
            debug!("Removed collision flag '{}' ({})", name, id);
        }
        removed
    }

    /// All flags ordered by creation index
    pub fn list(&self) -> Vec<&Flag> {
        self.flags.values().collect()
    }

    /// Iterate flags ordered by creation index
    pub fn iter(&self) -> impl Iterator<Item = &Flag> {
        self.flags.values()
    }

    /// Look up a flag by name
    pub fn lookup(&self, name: &str) -> Option<&Flag> {
        self.by_name.get(name).and_then(|id| self.flags.get(id))
    }

    /// Id of the flag with the given name
    pub fn id_of(&self, name: &str) -> Option<FlagId> {
        self.by_name.get(name).copied()
    }

    /// Look up a flag by id
    pub fn get(&self, id: FlagId) -> Option<&Flag> {
        self.flags.get(&id)
    }

    /// Name of the flag with the given id
    pub fn name_of(&self, id: FlagId) -> Option<&str> {
        self.get(id).map(Flag::name)
    }

    pub fn contains(&self, id: FlagId) -> bool {
        self.flags.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Whether the flags editor should stop offering new flags
    pub fn is_full(&self, limits: &CollisionLimits) -> bool {
        self.flags.len() >= limits.max_flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(registry: &FlagRegistry) -> Vec<&str> {
        registry.list().into_iter().map(Flag::name).collect()
    }

    #[test]
    fn test_register_assigns_creation_order() {
        let mut registry = FlagRegistry::new();
        let ground = registry.register("ground");
        let player = registry.register("player");

        assert_eq!(ground.index(), 0);
        assert_eq!(player.index(), 1);
        assert_eq!(names(&registry), vec!["ground", "player"]);
    }

    #[test]
    fn test_register_is_idempotent_by_name() {
        let mut registry = FlagRegistry::new();
        let first = registry.register("ground");
        let again = registry.register("ground");

        assert_eq!(first, again);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_list_is_creation_order_not_name_order() {
        let mut registry = FlagRegistry::new();
        registry.register("zombie");
        registry.register("apple");
        registry.register("middle");

        assert_eq!(names(&registry), vec!["zombie", "apple", "middle"]);
    }

    #[test]
    fn test_indices_are_never_reused() {
        let mut registry = FlagRegistry::new();
        let a = registry.register("a");
        let b = registry.register("b");
        assert!(registry.remove("a").is_some());

        let c = registry.register("c");
        assert!(c > b);
        assert_eq!(names(&registry), vec!["b", "c"]);
        assert!(registry.get(a).is_none());

        // Re-registering a removed name gets a fresh identity
        let a2 = registry.register("a");
        assert_ne!(a, a2);
        assert_eq!(names(&registry), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut registry = FlagRegistry::new();
        registry.register("ground");
        assert!(registry.remove("water").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_lookup() {
        let mut registry = FlagRegistry::new();
        let id = registry.register("ground");

        let flag = registry.lookup("ground").unwrap();
        assert_eq!(flag.id(), id);
        assert_eq!(registry.name_of(id), Some("ground"));
        assert!(registry.lookup("sky").is_none());
        assert!(registry.id_of("sky").is_none());
    }

    #[test]
    fn test_try_register_validation() {
        let mut registry = FlagRegistry::new();
        let limits = CollisionLimits::default();

        assert_eq!(
            registry.try_register("", &limits),
            Err(CollisionError::EmptyFlagName)
        );
        assert_eq!(
            registry.try_register("bad name!", &limits),
            Err(CollisionError::InvalidFlagName(" !".to_string()))
        );
        assert!(registry.try_register("Enemy2", &limits).is_ok());
        assert_eq!(
            registry.try_register("Enemy2", &limits),
            Err(CollisionError::DuplicateFlag("Enemy2".to_string()))
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_try_register_respects_limit() {
        let mut registry = FlagRegistry::new();
        let limits = CollisionLimits {
            max_flags: 2,
            ..Default::default()
        };
        registry.try_register("a", &limits).unwrap();
        registry.try_register("b", &limits).unwrap();

        assert!(registry.is_full(&limits));
        assert_eq!(
            registry.try_register("c", &limits),
            Err(CollisionError::CapacityExceeded {
                kind: CapacityKind::RegisteredFlags,
                max: 2,
            })
        );
    }
}
