//! # Edit Session
//!
//! One operator's editing session over a layout.
//!
//! The session owns the history (the single source of truth for the live
//! tree), the drag session, the selection and the id generator. Every edit
//! goes through [`EditSession::apply`], which validates the mutation, runs it
//! against the current snapshot and commits the result. Undo/redo only move
//! the history cursor.
//!
//! Invariant violations (unknown ids, bad parents, drops into the dragged
//! node's own subtree) are handled according to the configured
//! [`ErrorPolicy`]: returned as errors, or logged and ignored.

use crate::config::{EditorConfig, ErrorPolicy};
use crate::drag::{BoundingBox, DragPayload, DragSession, DropTarget};
use crate::history::History;
use crate::locator::{self, Located};
use crate::mutations::{Direction, Mutation, MutationError};
use crate::selection::Selection;
use crate::{dedupe_ids, EditorError};
use storefront_model::{
    collect_ids, IdGenerator, LayoutTree, Palette, PropertyMap, SectionNode, Template,
};
use tracing::{debug, error, info, warn};

/// Single editing session over one layout
pub struct EditSession {
    /// Session identifier (usually the document name)
    pub id: String,

    history: History,
    drag: DragSession,
    selection: Selection,
    ids: IdGenerator,
    palette: Palette,
    config: EditorConfig,
}

impl EditSession {
    /// Start a session seeded with `tree`. Repeated ids are re-minted.
    pub fn new(id: impl Into<String>, mut tree: LayoutTree, config: EditorConfig) -> Self {
        let id = id.into();
        let mut ids = match &config.id_seed {
            Some(seed) => IdGenerator::from_seed(seed.clone()),
            None => IdGenerator::new(&id),
        };
        for existing in collect_ids(&tree) {
            ids.observe(&existing);
        }

        let reminted = dedupe_ids(&mut tree, &mut ids);
        if reminted > 0 {
            warn!(session = %id, reminted, "Re-minted duplicate node ids in seed tree");
        }

        info!(session = %id, nodes = tree.node_count(), "Starting edit session");

        Self {
            id,
            history: History::with_max_undo_levels(tree, config.history_limit),
            drag: DragSession::new(),
            selection: Selection::new(),
            ids,
            palette: Palette::builtin(),
            config,
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// The live tree
    pub fn current(&self) -> &LayoutTree {
        self.history.current()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn drag(&self) -> &DragSession {
        &self.drag
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Live tree as a JSON value for the persistence layer
    pub fn to_json(&self) -> Result<serde_json::Value, EditorError> {
        Ok(self.current().to_value()?)
    }

    /// Apply a mutation and commit the result.
    ///
    /// Returns `Ok(false)` when a lenient session ignored an invalid edit.
    pub fn apply(&mut self, mutation: Mutation) -> Result<bool, EditorError> {
        let result = mutation
            .validate(self.current())
            .and_then(|_| mutation.apply(self.current()));

        match result {
            Ok(tree) => {
                debug!(session = %self.id, mutation = %mutation.describe(), "Applied mutation");
                self.history.commit_with_description(tree, mutation.describe());
                self.selection.retain_in(self.history.current());
                Ok(true)
            }
            Err(err) => self.reject(err),
        }
    }

    fn reject(&self, err: MutationError) -> Result<bool, EditorError> {
        match self.config.error_policy {
            ErrorPolicy::Strict => {
                error!(session = %self.id, error = %err, "Rejected edit");
                Err(err.into())
            }
            ErrorPolicy::Lenient => {
                warn!(session = %self.id, error = %err, "Ignoring invalid edit");
                Ok(false)
            }
        }
    }

    pub fn undo(&mut self) -> bool {
        let moved = self.history.undo();
        self.after_cursor_move(moved);
        moved
    }

    pub fn redo(&mut self) -> bool {
        let moved = self.history.redo();
        self.after_cursor_move(moved);
        moved
    }

    /// A hover target was resolved against the previous snapshot; the
    /// pointer has to hover again before a drop can land.
    fn after_cursor_move(&mut self, moved: bool) {
        if moved {
            self.drag.clear_target();
        }
        self.selection.retain_in(self.history.current());
    }

    // Inspector

    pub fn locate(&self, id: &str) -> Option<Located<'_>> {
        locator::locate(self.current(), id)
    }

    pub fn select(&mut self, id: &str) -> Result<bool, EditorError> {
        if !locator::contains(self.current(), id) {
            return self.reject(MutationError::NodeNotFound(id.to_string()));
        }
        self.selection.select(id);
        Ok(true)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selection.selected()
    }

    pub fn selected_node(&self) -> Option<&SectionNode> {
        self.selection
            .selected()
            .and_then(|id| locator::find(self.current(), id))
    }

    pub fn set_properties(&mut self, id: &str, properties: PropertyMap) -> Result<bool, EditorError> {
        self.apply(Mutation::SetProperties {
            node_id: id.to_string(),
            properties,
        })
    }

    pub fn set_presentation(&mut self, id: &str, overrides: PropertyMap) -> Result<bool, EditorError> {
        self.apply(Mutation::SetPresentation {
            node_id: id.to_string(),
            overrides,
        })
    }

    pub fn set_display_name(&mut self, id: &str, display_name: Option<String>) -> Result<bool, EditorError> {
        self.apply(Mutation::SetDisplayName {
            node_id: id.to_string(),
            display_name,
        })
    }

    // Structure edits

    pub fn remove(&mut self, id: &str) -> Result<bool, EditorError> {
        self.apply(Mutation::Remove {
            node_id: id.to_string(),
        })
    }

    pub fn move_node(&mut self, id: &str, direction: Direction) -> Result<bool, EditorError> {
        let Some(before) = locator::position(self.current(), id) else {
            return self.reject(MutationError::NodeNotFound(id.to_string()));
        };

        let at_boundary = match direction {
            Direction::Up => before.index == 0,
            Direction::Down => {
                let siblings = match &before.parent_id {
                    Some(parent) => locator::find(self.current(), parent).map_or(0, |p| p.children().len()),
                    None => self.current().roots.len(),
                };
                before.index + 1 >= siblings
            }
        };
        if at_boundary {
            debug!(node_id = %id, ?direction, "Move at boundary ignored");
            return Ok(false);
        }

        self.apply(Mutation::Move {
            node_id: id.to_string(),
            direction,
        })
    }

    /// Instantiate `template` with fresh ids and insert it.
    ///
    /// Returns the new node's id, or `None` if a lenient session ignored the edit.
    pub fn add_node(
        &mut self,
        template: &Template,
        parent_id: Option<&str>,
        index: usize,
    ) -> Result<Option<String>, EditorError> {
        let node = template.instantiate(&mut self.ids);
        self.insert_node(parent_id, index, node)
    }

    /// Look up `kind` in the palette and add it
    pub fn add_from_palette(
        &mut self,
        kind: &str,
        parent_id: Option<&str>,
        index: usize,
    ) -> Result<Option<String>, EditorError> {
        let template = self
            .palette
            .get(kind)
            .cloned()
            .ok_or_else(|| EditorError::UnknownTemplate(kind.to_string()))?;
        self.add_node(&template, parent_id, index)
    }

    /// Deep-copy a node with fresh ids and insert the copy right after it
    pub fn duplicate(&mut self, id: &str) -> Result<Option<String>, EditorError> {
        let (copy, position) = match (
            locator::find(self.history.current(), id),
            locator::position(self.history.current(), id),
        ) {
            (Some(node), Some(position)) => (node.duplicate(&mut self.ids), position),
            _ => {
                return self
                    .reject(MutationError::NodeNotFound(id.to_string()))
                    .map(|_| None)
            }
        };

        self.insert_node(position.parent_id.as_deref(), position.index + 1, copy)
    }

    fn insert_node(
        &mut self,
        parent_id: Option<&str>,
        index: usize,
        node: SectionNode,
    ) -> Result<Option<String>, EditorError> {
        let new_id = node.id.clone();
        let applied = self.apply(Mutation::Insert {
            parent_id: parent_id.map(str::to_string),
            index,
            node,
        })?;

        if !applied {
            return Ok(None);
        }

        self.selection.select(new_id.clone());
        Ok(Some(new_id))
    }

    // Drag and drop

    /// Start dragging an existing node
    pub fn begin_drag_node(&mut self, id: &str) -> Result<bool, EditorError> {
        let Some(origin) = locator::position(self.current(), id) else {
            return self.reject(MutationError::NodeNotFound(id.to_string()));
        };

        self.drag.begin_drag(
            DragPayload::Existing {
                node_id: id.to_string(),
            },
            Some(origin),
        );
        Ok(true)
    }

    /// Start dragging a template from the palette
    pub fn begin_drag_template(&mut self, template: Template) {
        self.drag.begin_drag(DragPayload::Template(template), None);
    }

    pub fn update_hover_target(
        &mut self,
        candidate_id: &str,
        pointer_y: f64,
        bounds: BoundingBox,
    ) -> Result<Option<DropTarget>, EditorError> {
        let result = self
            .drag
            .update_hover_target(self.history.current(), candidate_id, pointer_y, bounds);
        self.resolve_hover(result)
    }

    pub fn hover_inside(&mut self, container_id: &str) -> Result<Option<DropTarget>, EditorError> {
        let result = self.drag.hover_inside(self.history.current(), container_id);
        self.resolve_hover(result)
    }

    fn resolve_hover(
        &self,
        result: Result<Option<DropTarget>, MutationError>,
    ) -> Result<Option<DropTarget>, EditorError> {
        match result {
            Ok(target) => Ok(target),
            Err(err) => self.reject(err).map(|_| None),
        }
    }

    /// Finish the drag, committing the drop if a target is set
    pub fn commit_drop(&mut self) -> Result<bool, EditorError> {
        let Some(drop) = self.drag.take_drop() else {
            return Ok(false);
        };

        match drop.payload {
            DragPayload::Existing { node_id } => {
                let Some(origin) = locator::position(self.current(), &node_id) else {
                    return self.reject(MutationError::NodeNotFound(node_id));
                };

                if drop.target.is_noop_for(&origin) {
                    debug!(node_id = %node_id, "Dropped onto own position");
                    return Ok(false);
                }

                let target = drop.target.adjusted_for(&origin);
                self.apply(Mutation::Relocate {
                    node_id,
                    parent_id: target.parent_id,
                    index: target.index,
                })
            }
            DragPayload::Template(template) => {
                let added = self.add_node(&template, drop.target.parent_id.as_deref(), drop.target.index)?;
                Ok(added.is_some())
            }
        }
    }

    pub fn cancel_drag(&mut self) {
        self.drag.cancel_drag();
    }
}
