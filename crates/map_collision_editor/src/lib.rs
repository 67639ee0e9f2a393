//! map_collision_editor - Collision editing workflow for tile-map editors
//!
//! This crate provides the state behind a collision editor UI:
//! - Multi-object edit sessions with drafts and fixed part slots
//! - Copying one object's collision setup to the rest of a selection
//! - Cascading flag deletion across committed and in-edit profiles
//! - Editor settings and collision project save/load
//!
//! # Usage
//!
//! ```rust,ignore
//! use map_collision_editor::{CollisionEditor, SceneObjects, EditorSettings};
//!
//! let settings = EditorSettings::load();
//! let mut editor = CollisionEditor::new(settings.limits);
//! editor.register_flag("ground")?;
//!
//! let session = editor.open_session(&scene)?;
//! session.commit_draft_part();
//! editor.confirm(&mut scene);
//! ```

pub mod editor;
pub mod project;
pub mod session;
pub mod settings;
pub mod store;

// Re-export the data model
pub use map_collision_core;

pub use editor::{CollisionEditor, FlagRemovalImpact};
pub use project::{CollisionProject, ObjectRecord, ProjectError};
pub use session::{CommitReport, EditSession};
pub use settings::{EditorSettings, SettingsError};
pub use store::{ObjectId, ObjectStore, SceneObject, SceneObjects};
