//! The collision editor context
//!
//! [`CollisionEditor`] owns the flag registry, the capacity limits and the
//! (at most one) open [`EditSession`]. The UI issues commands against it and
//! re-renders from what it returns; nothing in here calls back into widgets.

use crate::session::{CommitReport, EditSession};
use crate::store::{ObjectId, ObjectStore};
use map_collision_core::{CollisionError, CollisionLimits, Flag, FlagId, FlagRegistry};
use tracing::{info, warn};

/// How many objects deleting a flag would touch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlagRemovalImpact {
    /// Committed objects whose profile references the flag
    pub existing: usize,
    /// Objects in the open session whose draft or edit slot references the flag
    pub editing: usize,
}

impl FlagRemovalImpact {
    /// Whether deleting the flag touches no object at all
    pub fn is_empty(&self) -> bool {
        self.existing == 0 && self.editing == 0
    }

    /// Confirmation text to show before deleting `flag_name`
    pub fn confirmation_message(&self, flag_name: &str) -> String {
        let affected = match (self.existing, self.editing) {
            (0, 0) => String::new(),
            (0, editing) => format!("This will affect {} objects being edited.\n", editing),
            (existing, 0) => format!("This will affect {} existing objects.\n", existing),
            (existing, editing) => format!(
                "This will affect {} existing objects and\n{} objects being edited.\n",
                existing, editing
            ),
        };
        if affected.is_empty() {
            format!(
                "Are you sure that you want to delete the\n{} flag?\nThis operation can't be reverted.",
                flag_name
            )
        } else {
            format!(
                "{}Are you sure you want to remove the\n{} flag?\nThis operation can't be reverted.",
                affected, flag_name
            )
        }
    }
}

/// Owner of all collision editing state
#[derive(Debug, Clone, Default)]
pub struct CollisionEditor {
    registry: FlagRegistry,
    limits: CollisionLimits,
    session: Option<EditSession>,
}

impl CollisionEditor {
    /// Create an editor with an empty flag registry
    pub fn new(limits: CollisionLimits) -> Self {
        Self::with_registry(FlagRegistry::new(), limits)
    }

    /// Create an editor around an existing registry (e.g. a loaded project)
    pub fn with_registry(registry: FlagRegistry, limits: CollisionLimits) -> Self {
        Self {
            registry,
            limits,
            session: None,
        }
    }

    pub fn registry(&self) -> &FlagRegistry {
        &self.registry
    }

    pub fn limits(&self) -> &CollisionLimits {
        &self.limits
    }

    /// Flags in creation order, as the flags editor lists them
    pub fn flags(&self) -> Vec<&Flag> {
        self.registry.list()
    }

    /// Register a flag typed into the flags editor
    pub fn register_flag(&mut self, name: &str) -> Result<FlagId, CollisionError> {
        let id = self.registry.try_register(name, &self.limits)?;
        info!("Added collision flag '{}'", name);
        Ok(id)
    }

    /// Whether the flags editor has reached its flag limit
    pub fn flags_full(&self) -> bool {
        self.registry.is_full(&self.limits)
    }

    /// Open a session on the store's current selection
    pub fn open_session<S: ObjectStore + ?Sized>(
        &mut self,
        store: &S,
    ) -> Result<&mut EditSession, CollisionError> {
        let selection = store.selected_objects();
        self.open_session_for(store, &selection)
    }

    /// Open a session on explicit targets, replacing any open session
    pub fn open_session_for<S: ObjectStore + ?Sized>(
        &mut self,
        store: &S,
        targets: &[ObjectId],
    ) -> Result<&mut EditSession, CollisionError> {
        let session = EditSession::open(store, targets, &self.limits)?;
        if self.session.is_some() {
            warn!("Replacing an open collision edit session; its drafts are dropped");
        }
        Ok(self.session.insert(session))
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut EditSession> {
        self.session.as_mut()
    }

    pub fn is_session_open(&self) -> bool {
        self.session.is_some()
    }

    /// Confirm the open session. Returns `None` if no session was open.
    pub fn confirm<S: ObjectStore + ?Sized>(&mut self, store: &mut S) -> Option<CommitReport> {
        self.session.take().map(|session| session.confirm(store))
    }

    /// Discard the open session. Returns whether one was open.
    pub fn discard<S: ObjectStore + ?Sized>(&mut self, store: &mut S) -> bool {
        match self.session.take() {
            Some(session) => {
                session.discard(store);
                true
            }
            None => false,
        }
    }

    /// Count what deleting `flag_name` would touch, without changing anything
    pub fn flag_removal_impact<S: ObjectStore + ?Sized>(
        &self,
        flag_name: &str,
        store: &S,
    ) -> Result<FlagRemovalImpact, CollisionError> {
        let flag = self.flag_id(flag_name)?;
        let existing = store
            .all_objects()
            .into_iter()
            .filter(|&id| {
                store
                    .collision_info(id)
                    .is_some_and(|info| info.references_flag(flag))
            })
            .count();
        let editing = self
            .session
            .as_ref()
            .map_or(0, |session| session.flag_references(flag));
        Ok(FlagRemovalImpact { existing, editing })
    }

    /// Delete a flag and every reference to it, in committed objects and in
    /// the open session's drafts and spare parts.
    ///
    /// Returns the impact as counted before the deletion.
    pub fn delete_flag_cascade<S: ObjectStore + ?Sized>(
        &mut self,
        flag_name: &str,
        store: &mut S,
    ) -> Result<FlagRemovalImpact, CollisionError> {
        let impact = self.flag_removal_impact(flag_name, store)?;
        let flag = self.flag_id(flag_name)?;

        let mut parts_changed = 0;
        for id in store.all_objects() {
            if let Some(info) = store.collision_info_mut(id) {
                parts_changed += info.remove_flag(flag);
            }
        }
        if let Some(session) = self.session.as_mut() {
            parts_changed += session.remove_flag(flag);
        }
        self.registry.remove(flag_name);

        info!(
            "Deleted collision flag '{}': {} existing and {} editing object(s), {} part(s) changed",
            flag_name, impact.existing, impact.editing, parts_changed
        );
        Ok(impact)
    }

    fn flag_id(&self, flag_name: &str) -> Result<FlagId, CollisionError> {
        self.registry
            .id_of(flag_name)
            .ok_or_else(|| CollisionError::UnknownFlag(flag_name.to_string()))
    }
}
