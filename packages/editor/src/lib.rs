//! # Storefront Editor
//!
//! Document-tree engine behind the homepage layout editor.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: SectionNode / LayoutTree / Template  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: tree engine                         │
//! │  - locator: find nodes and parents          │
//! │  - mutations: pure tree → tree edits        │
//! │  - drag: drag session + drop targets        │
//! │  - history: linear undo/redo snapshots      │
//! │  - session: ties it together per operator   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ renderer / persistence (external)           │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **History is the source of truth**: the live tree is whatever snapshot
//!    the history cursor points at
//! 2. **Pure mutations**: every edit returns a new tree, nothing is changed in place
//! 3. **Ids are never reused**: templates and copies always get fresh ids
//! 4. **Refuse, don't repair**: drops into a node's own subtree never produce a target
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_editor::{EditorConfig, LayoutDocument, Direction};
//!
//! let mut doc = LayoutDocument::load("homepage.json".into())?;
//! let mut session = doc.session(EditorConfig::default());
//!
//! let id = session.add_from_palette("heading", None, 0)?;
//! session.move_node(&id.unwrap(), Direction::Down)?;
//! session.undo();
//!
//! doc.set_tree(session.current().clone());
//! doc.save()?;
//! ```

mod config;
mod document;
mod drag;
mod errors;
mod history;
pub mod locator;
pub mod mutations;
mod selection;
mod session;

pub use config::{EditorConfig, ErrorPolicy};
pub use document::{dedupe_ids, default_tree, DocumentStorage, LayoutDocument};
pub use drag::{
    ActiveDrag, BoundingBox, DragPayload, DragSession, DragState, DropSide, DropTarget,
    PendingDrop,
};
pub use errors::EditorError;
pub use history::{History, HistoryEntry};
pub use locator::{locate, Located, Position};
pub use mutations::{Direction, Mutation, MutationError, NodePatch};
pub use selection::Selection;
pub use session::EditSession;

// Re-export model types for convenience
pub use storefront_model::{IdGenerator, LayoutTree, Palette, PropertyMap, SectionNode, Template};
