//! Multi-object collision editing
//!
//! An [`EditSession`] is opened on a selection of objects. Each target gets a
//! draft (a deep copy of its committed profile) and a pool of blank spare
//! parts, sized so that `draft parts + spares == max_parts`. The editing UI
//! always shows exactly `max_parts` slots per object: the draft's parts, then
//! the first spare as the "Edit" slot where a new part is put together before
//! it is applied.
//!
//! Nothing reaches the object store until [`EditSession::confirm`].

use crate::store::{ObjectId, ObjectStore};
use map_collision_core::{
    CapacityKind, CollisionError, CollisionInformation, CollisionLimits, FlagId, PartInformation,
};
use std::collections::HashSet;
use tracing::{debug, info};

/// Working state for one target object
#[derive(Debug, Clone)]
struct TargetDraft {
    id: ObjectId,
    draft: CollisionInformation,
    spares: Vec<PartInformation>,
    /// Part count of the committed profile when the session opened
    committed_parts: Option<usize>,
}

impl TargetDraft {
    fn new(
        id: ObjectId,
        committed: Option<&CollisionInformation>,
        max_parts: usize,
    ) -> Result<Self, CollisionError> {
        let draft = committed.cloned().unwrap_or_default();
        if draft.part_count() > max_parts {
            return Err(CollisionError::CapacityExceeded {
                kind: CapacityKind::Parts,
                max: max_parts,
            });
        }

        let mut target = Self {
            id,
            draft,
            spares: Vec::new(),
            committed_parts: committed.map(CollisionInformation::part_count),
        };
        target.rebalance(max_parts);
        Ok(target)
    }

    /// Drop trailing spares or add blank ones until the slot count matches
    fn rebalance(&mut self, max_parts: usize) {
        let wanted = max_parts.saturating_sub(self.draft.part_count());
        self.spares.truncate(wanted);
        self.spares.resize_with(wanted, PartInformation::new);
    }

    fn references_flag(&self, flag: FlagId) -> bool {
        self.draft.references_flag(flag) || self.spares.iter().any(|p| p.references_flag(flag))
    }

    fn remove_flag(&mut self, flag: FlagId) -> usize {
        let mut removed = self.draft.remove_flag(flag);
        for spare in &mut self.spares {
            if spare.remove_flag(flag) {
                removed += 1;
            }
        }
        removed
    }
}

/// Outcome of [`EditSession::confirm`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommitReport {
    /// Targets whose profile was written back
    pub written: usize,
    /// Targets left untouched (no prior profile and nothing added)
    pub skipped: usize,
}

/// An open collision editing transaction over one or more objects
#[derive(Debug, Clone)]
pub struct EditSession {
    targets: Vec<TargetDraft>,
    active: usize,
    max_parts: usize,
}

impl EditSession {
    /// Open a session over `targets`, copying their committed profiles.
    ///
    /// Duplicate ids are ignored. Fails with [`CollisionError::NoSelection`]
    /// when `targets` is empty.
    pub fn open<S: ObjectStore + ?Sized>(
        store: &S,
        targets: &[ObjectId],
        limits: &CollisionLimits,
    ) -> Result<Self, CollisionError> {
        let mut seen = HashSet::new();
        let drafts = targets
            .iter()
            .filter(|id| seen.insert(**id))
            .map(|&id| TargetDraft::new(id, store.collision_info(id), limits.max_parts))
            .collect::<Result<Vec<_>, _>>()?;

        if drafts.is_empty() {
            return Err(CollisionError::NoSelection);
        }

        info!("Opened collision edit session for {} object(s)", drafts.len());
        let session = Self {
            targets: drafts,
            active: 0,
            max_parts: limits.max_parts,
        };
        session.debug_check_slots();
        Ok(session)
    }

    /// Ids of the objects under edit, in selection order
    pub fn targets(&self) -> Vec<ObjectId> {
        self.targets.iter().map(|t| t.id).collect()
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// Number of slots each target shows (the configured part limit)
    pub fn max_parts(&self) -> usize {
        self.max_parts
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Id of the object currently shown
    pub fn active_target(&self) -> ObjectId {
        self.targets[self.active].id
    }

    /// Show the next object, wrapping around
    pub fn select_next(&mut self) -> ObjectId {
        self.active = (self.active + 1) % self.targets.len();
        self.active_target()
    }

    /// Show the previous object, wrapping around
    pub fn select_previous(&mut self) -> ObjectId {
        let count = self.targets.len();
        self.active = (self.active + count - 1) % count;
        self.active_target()
    }

    /// Draft of the object currently shown
    pub fn active_draft(&self) -> &CollisionInformation {
        &self.targets[self.active].draft
    }

    /// Draft of any target
    pub fn draft(&self, id: ObjectId) -> Option<&CollisionInformation> {
        self.target(id).map(|t| &t.draft)
    }

    /// Number of spare parts a target has left
    pub fn spare_count(&self, id: ObjectId) -> Option<usize> {
        self.target(id).map(|t| t.spares.len())
    }

    /// Slot index of the active target's edit slot, if it has one.
    ///
    /// Slots `0..parts` are the draft's parts; the edit slot follows them.
    pub fn edit_slot_index(&self) -> Option<usize> {
        let target = &self.targets[self.active];
        (!target.spares.is_empty()).then(|| target.draft.part_count())
    }

    /// Number of slots the UI shows for the active target
    pub fn slot_count(&self) -> usize {
        let target = &self.targets[self.active];
        target.draft.part_count() + usize::from(!target.spares.is_empty())
    }

    /// The in-progress part of the active target
    pub fn edit_slot(&self) -> Option<&PartInformation> {
        self.targets[self.active].spares.first()
    }

    pub fn edit_slot_mut(&mut self) -> Option<&mut PartInformation> {
        self.targets[self.active].spares.first_mut()
    }

    /// Part shown in `slot` for the active target (a draft part or the edit slot)
    pub fn slot(&self, slot: usize) -> Option<&PartInformation> {
        let target = &self.targets[self.active];
        let parts = target.draft.part_count();
        if slot < parts {
            target.draft.part(slot)
        } else if slot == parts {
            target.spares.first()
        } else {
            None
        }
    }

    /// Mutable part shown in `slot` for the active target
    pub fn slot_mut(&mut self, slot: usize) -> Option<&mut PartInformation> {
        let target = &mut self.targets[self.active];
        let parts = target.draft.part_count();
        if slot < parts {
            target.draft.part_mut(slot)
        } else if slot == parts {
            target.spares.first_mut()
        } else {
            None
        }
    }

    pub fn set_dynamic(&mut self, value: bool) {
        self.targets[self.active].draft.dynamic = value;
    }

    pub fn set_high_speed(&mut self, value: bool) {
        self.targets[self.active].draft.high_speed = value;
    }

    pub fn set_fixed_rotation(&mut self, value: bool) {
        self.targets[self.active].draft.fixed_rotation = value;
    }

    /// Apply the edit slot: it becomes the last part of the active draft.
    ///
    /// Returns `false` and does nothing when the draft already uses every slot.
    pub fn commit_draft_part(&mut self) -> bool {
        let target = &mut self.targets[self.active];
        if target.spares.is_empty() {
            return false;
        }
        let part = target.spares.remove(0);
        target.draft.add_part(part);
        debug!(
            "Applied part {} for object {}",
            target.draft.part_count(),
            target.id
        );
        self.debug_check_slots();
        true
    }

    /// Delete the draft part in `slot` from the active target, returning it.
    ///
    /// The edit slot can't be deleted because it was never added.
    pub fn delete_part(&mut self, slot: usize) -> Result<PartInformation, CollisionError> {
        let target = &mut self.targets[self.active];
        let parts = target.draft.part_count();
        if slot == parts && !target.spares.is_empty() {
            return Err(CollisionError::ProtectedSlot);
        }
        let removed = target
            .draft
            .remove_part(slot)
            .ok_or(CollisionError::UnknownSlot(slot))?;
        target.spares.push(PartInformation::new());
        debug!("Deleted part {} of object {}", slot + 1, target.id);
        self.debug_check_slots();
        Ok(removed)
    }

    /// Number of other targets whose committed, non-empty profile
    /// [`propagate_active_to_all`](Self::propagate_active_to_all) would replace
    pub fn propagation_impact(&self) -> usize {
        self.targets
            .iter()
            .enumerate()
            .filter(|&(idx, t)| idx != self.active && t.committed_parts.is_some_and(|n| n > 0))
            .count()
    }

    /// Copy the active draft over every other target's draft.
    ///
    /// Returns the [`propagation_impact`](Self::propagation_impact) so the
    /// caller can report what will be lost on confirm.
    pub fn propagate_active_to_all(&mut self) -> usize {
        let impact = self.propagation_impact();
        let source = self.targets[self.active].draft.clone();
        let active = self.active;
        let max_parts = self.max_parts;

        for (idx, target) in self.targets.iter_mut().enumerate() {
            if idx == active {
                continue;
            }
            target.draft = source.clone();
            target.rebalance(max_parts);
        }

        info!(
            "Copied collision draft to {} other object(s), replacing {} existing profile(s)",
            self.targets.len() - 1,
            impact
        );
        self.debug_check_slots();
        impact
    }

    /// Number of targets whose draft or spare parts reference `flag`
    pub fn flag_references(&self, flag: FlagId) -> usize {
        self.targets
            .iter()
            .filter(|t| t.references_flag(flag))
            .count()
    }

    /// Remove `flag` from every draft and spare part. Returns the number of
    /// parts that changed.
    pub fn remove_flag(&mut self, flag: FlagId) -> usize {
        self.targets.iter_mut().map(|t| t.remove_flag(flag)).sum()
    }

    /// Write the drafts back to the store and close the session.
    ///
    /// A target that had no profile and still has no parts is left alone, so
    /// confirming never creates empty profiles.
    pub fn confirm<S: ObjectStore + ?Sized>(self, store: &mut S) -> CommitReport {
        let mut report = CommitReport::default();
        for target in self.targets {
            let had_profile = store.collision_info(target.id).is_some();
            if target.draft.is_empty() && !had_profile {
                report.skipped += 1;
                continue;
            }
            store.set_collision_info(target.id, target.draft);
            report.written += 1;
        }
        store.release_focus();
        info!(
            "Committed collision edits: {} written, {} skipped",
            report.written, report.skipped
        );
        report
    }

    /// Close the session without writing anything
    pub fn discard<S: ObjectStore + ?Sized>(self, store: &mut S) {
        store.release_focus();
        info!(
            "Discarded collision edit session for {} object(s)",
            self.targets.len()
        );
    }

    fn target(&self, id: ObjectId) -> Option<&TargetDraft> {
        self.targets.iter().find(|t| t.id == id)
    }

    fn debug_check_slots(&self) {
        debug_assert!(self
            .targets
            .iter()
            .all(|t| t.draft.part_count() + t.spares.len() == self.max_parts));
    }
}
