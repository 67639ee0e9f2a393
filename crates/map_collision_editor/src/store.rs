//! Access to the scene's objects
//!
//! The scene itself (rendering, selection gestures, undo) lives outside this
//! crate. Editing only needs object ids, each object's committed collision
//! profile, and the current selection.

use map_collision_core::CollisionInformation;
use std::collections::HashMap;
use uuid::Uuid;

/// Identifier of a scene object
pub type ObjectId = Uuid;

/// The scene as seen by the collision editor
pub trait ObjectStore {
    /// Ids of every live object
    fn all_objects(&self) -> Vec<ObjectId>;

    /// Ids of the currently selected objects, in selection order
    fn selected_objects(&self) -> Vec<ObjectId>;

    /// Committed collision profile of an object
    fn collision_info(&self, id: ObjectId) -> Option<&CollisionInformation>;

    /// Mutable committed collision profile of an object
    fn collision_info_mut(&mut self, id: ObjectId) -> Option<&mut CollisionInformation>;

    /// Replace an object's collision profile
    fn set_collision_info(&mut self, id: ObjectId, info: CollisionInformation);

    /// Called when the collision editor closes, so the host can take back
    /// keyboard focus
    fn release_focus(&mut self) {}
}

/// An object placed in the scene
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub id: ObjectId,
    pub name: String,
    pub collision: Option<CollisionInformation>,
}

impl SceneObject {
    /// Create a new object without collision data
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            collision: None,
        }
    }

    /// Attach a collision profile
    pub fn with_collision(mut self, collision: CollisionInformation) -> Self {
        self.collision = Some(collision);
        self
    }
}

/// In-memory [`ObjectStore`], used by headless tools and tests
#[derive(Debug, Clone, Default)]
pub struct SceneObjects {
    objects: Vec<SceneObject>,
    index: HashMap<ObjectId, usize>,
    selection: Vec<ObjectId>,
    focus_releases: usize,
}

impl SceneObjects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object, returning its id
    pub fn add(&mut self, object: SceneObject) -> ObjectId {
        let id = object.id;
        if let Some(&idx) = self.index.get(&id) {
            self.objects[idx] = object;
        } else {
            self.index.insert(id, self.objects.len());
            self.objects.push(object);
        }
        id
    }

    /// Remove an object by id
    pub fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        let idx = self.index.remove(&id)?;
        let removed = self.objects.remove(idx);
        self.rebuild_index();
        self.selection.retain(|&s| s != id);
        Some(removed)
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.index.get(&id).map(|&idx| &self.objects[idx])
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.index.get(&id).map(|&idx| &mut self.objects[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Add an object to the selection. Unknown ids are ignored.
    pub fn select(&mut self, id: ObjectId) {
        if self.index.contains_key(&id) && !self.selection.contains(&id) {
            self.selection.push(id);
        }
    }

    /// Replace the selection
    pub fn set_selection(&mut self, ids: &[ObjectId]) {
        self.selection.clear();
        for &id in ids {
            self.select(id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// How many times an editor handed focus back
    pub fn focus_releases(&self) -> usize {
        self.focus_releases
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (idx, object) in self.objects.iter().enumerate() {
            self.index.insert(object.id, idx);
        }
    }
}

impl ObjectStore for SceneObjects {
    fn all_objects(&self) -> Vec<ObjectId> {
        self.objects.iter().map(|o| o.id).collect()
    }

    fn selected_objects(&self) -> Vec<ObjectId> {
        self.selection.clone()
    }

    fn collision_info(&self, id: ObjectId) -> Option<&CollisionInformation> {
        self.get(id).and_then(|o| o.collision.as_ref())
    }

    fn collision_info_mut(&mut self, id: ObjectId) -> Option<&mut CollisionInformation> {
        self.get_mut(id).and_then(|o| o.collision.as_mut())
    }

    fn set_collision_info(&mut self, id: ObjectId, info: CollisionInformation) {
        if let Some(object) = self.get_mut(id) {
            object.collision = Some(info);
        }
    }

    fn release_focus(&mut self) {
        self.focus_releases += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use map_collision_core::PartInformation;

    #[test]
    fn test_add_get_remove() {
        let mut scene = SceneObjects::new();
        let a = scene.add(SceneObject::new("Crate".to_string()));
        let b = scene.add(SceneObject::new("Wall".to_string()));

        assert_eq!(scene.len(), 2);
        assert_eq!(scene.get(b).unwrap().name, "Wall");

        scene.select(a);
        scene.select(b);
        assert!(scene.remove(a).is_some());
        assert_eq!(scene.selected_objects(), vec![b]);
        assert_eq!(scene.get(b).unwrap().name, "Wall");
        assert!(scene.get(a).is_none());
    }

    #[test]
    fn test_selection_ignores_unknown_and_duplicates() {
        let mut scene = SceneObjects::new();
        let a = scene.add(SceneObject::new("Crate".to_string()));

        scene.set_selection(&[a, Uuid::new_v4(), a]);
        assert_eq!(scene.selected_objects(), vec![a]);
    }

    #[test]
    fn test_collision_info_access() {
        let mut scene = SceneObjects::new();
        let a = scene.add(SceneObject::new("Crate".to_string()));
        assert!(scene.collision_info(a).is_none());

        let mut info = CollisionInformation::new();
        info.add_part(PartInformation::new());
        scene.set_collision_info(a, info);
        assert_eq!(scene.collision_info(a).unwrap().part_count(), 1);

        scene.collision_info_mut(a).unwrap().dynamic = true;
        assert!(scene.collision_info(a).unwrap().dynamic);
    }
}
