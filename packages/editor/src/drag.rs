//! # Drag Session & Drop Target Resolution
//!
//! Transient, UI-only state for one drag-and-drop gesture.
//!
//! ```text
//! Idle ──begin_drag──▶ Dragging ──take_drop / cancel_drag──▶ Idle
//! ```
//!
//! While dragging, pointer movement over a candidate node resolves to a
//! [`DropTarget`]: the upper half of the candidate's box means "before it",
//! the lower half "after it". Empty containers additionally accept an
//! "append inside" target. Targets inside the dragged node's own subtree are
//! refused, so such a drop can never commit.

use crate::locator::{self, Position};
use crate::mutations::MutationError;
use storefront_model::{LayoutTree, Template};
use tracing::debug;

/// Vertical extent of a candidate node as laid out by the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub top: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }
}

/// Which side of the candidate the pointer is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropSide {
    Before,
    After,
}

impl DropSide {
    /// Upper half is `Before`, lower half (midpoint included) is `After`.
    /// Positions outside the box clamp to the nearest half.
    pub fn from_pointer(pointer_y: f64, bounds: BoundingBox) -> Self {
        let y_in_box = (pointer_y - bounds.top).max(0.0);
        if y_in_box < bounds.height / 2.0 {
            DropSide::Before
        } else {
            DropSide::After
        }
    }
}

/// Where a dragged node would land
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTarget {
    /// `None` for the top level
    pub parent_id: Option<String>,

    /// Index in pre-removal coordinates
    pub index: usize,
}

impl DropTarget {
    pub fn new(parent_id: Option<&str>, index: usize) -> Self {
        Self {
            parent_id: parent_id.map(str::to_string),
            index,
        }
    }

    /// Convert to post-removal coordinates for a node currently at `origin`.
    ///
    /// Removing the node first shifts every later sibling down by one.
    pub fn adjusted_for(&self, origin: &Position) -> DropTarget {
        let shifted = self.parent_id == origin.parent_id && origin.index < self.index;
        DropTarget {
            parent_id: self.parent_id.clone(),
            index: if shifted { self.index - 1 } else { self.index },
        }
    }

    /// True if dropping here leaves a node at `origin` where it already is
    pub fn is_noop_for(&self, origin: &Position) -> bool {
        let adjusted = self.adjusted_for(origin);
        adjusted.parent_id == origin.parent_id && adjusted.index == origin.index
    }
}

/// What is being dragged
#[derive(Debug, Clone, PartialEq)]
pub enum DragPayload {
    /// An existing node being relocated
    Existing { node_id: String },

    /// A palette template to instantiate on drop
    Template(Template),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveDrag {
    pub payload: DragPayload,

    /// `None` for palette drags
    pub origin: Option<Position>,

    pub current_target: Option<DropTarget>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(ActiveDrag),
}

/// A drop that is ready to be committed
#[derive(Debug, Clone, PartialEq)]
pub struct PendingDrop {
    pub payload: DragPayload,
    pub origin: Option<Position>,
    pub target: DropTarget,
}

#[derive(Debug, Clone, Default)]
pub struct DragSession {
    state: DragState,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a drag. An unfinished previous drag is discarded.
    pub fn begin_drag(&mut self, payload: DragPayload, origin: Option<Position>) {
        debug!(payload = ?payload_label(&payload), origin = ?origin, "Begin drag");
        self.state = DragState::Dragging(ActiveDrag {
            payload,
            origin,
            current_target: None,
        });
    }

    /// Resolve the pointer position over `candidate_id` into a drop target.
    ///
    /// Returns the accepted target, or `None` when idle or when the target
    /// would put the dragged node inside itself.
    pub fn update_hover_target(
        &mut self,
        tree: &LayoutTree,
        candidate_id: &str,
        pointer_y: f64,
        bounds: BoundingBox,
    ) -> Result<Option<DropTarget>, MutationError> {
        let DragState::Dragging(active) = &mut self.state else {
            return Ok(None);
        };

        let Some(position) = locator::position(tree, candidate_id) else {
            active.current_target = None;
            return Err(MutationError::NodeNotFound(candidate_id.to_string()));
        };

        let index = match DropSide::from_pointer(pointer_y, bounds) {
            DropSide::Before => position.index,
            DropSide::After => position.index + 1,
        };
        let target = DropTarget {
            parent_id: position.parent_id,
            index,
        };

        Ok(accept(active, tree, target))
    }

    /// "Append inside" target of an empty container
    pub fn hover_inside(
        &mut self,
        tree: &LayoutTree,
        container_id: &str,
    ) -> Result<Option<DropTarget>, MutationError> {
        let DragState::Dragging(active) = &mut self.state else {
            return Ok(None);
        };

        let Some(container) = locator::find(tree, container_id) else {
            active.current_target = None;
            return Err(MutationError::NodeNotFound(container_id.to_string()));
        };

        if !matches!(&container.children, Some(children) if children.is_empty()) {
            active.current_target = None;
            return Ok(None);
        }

        Ok(accept(active, tree, DropTarget::new(Some(container_id), 0)))
    }

    /// Forget the hovered target without ending the drag
    pub fn clear_target(&mut self) {
        if let DragState::Dragging(active) = &mut self.state {
            active.current_target = None;
        }
    }

    /// End the drag and hand back the drop to commit, if there is a target
    pub fn take_drop(&mut self) -> Option<PendingDrop> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(ActiveDrag {
                payload,
                origin,
                current_target: Some(target),
            }) => Some(PendingDrop {
                payload,
                origin,
                target,
            }),
            DragState::Dragging(_) => {
                debug!("Drop without target; drag cancelled");
                None
            }
            DragState::Idle => None,
        }
    }

    /// Abandon the drag without touching the tree
    pub fn cancel_drag(&mut self) {
        if self.is_dragging() {
            debug!("Drag cancelled");
        }
        self.state = DragState::Idle;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn payload(&self) -> Option<&DragPayload> {
        match &self.state {
            DragState::Dragging(active) => Some(&active.payload),
            DragState::Idle => None,
        }
    }

    pub fn origin(&self) -> Option<&Position> {
        match &self.state {
            DragState::Dragging(active) => active.origin.as_ref(),
            DragState::Idle => None,
        }
    }

    pub fn current_target(&self) -> Option<&DropTarget> {
        match &self.state {
            DragState::Dragging(active) => active.current_target.as_ref(),
            DragState::Idle => None,
        }
    }
}

fn accept(active: &mut ActiveDrag, tree: &LayoutTree, target: DropTarget) -> Option<DropTarget> {
    if let (DragPayload::Existing { node_id }, Some(parent_id)) = (&active.payload, &target.parent_id) {
        if locator::is_self_or_descendant(tree, node_id, parent_id) {
            debug!(node_id = %node_id, parent_id = %parent_id, "Refusing drop target inside dragged node");
            active.current_target = None;
            return None;
        }
    }

    active.current_target = Some(target.clone());
    Some(target)
}

fn payload_label(payload: &DragPayload) -> &str {
    match payload {
        DragPayload::Existing { node_id } => node_id,
        DragPayload::Template(template) => &template.kind,
    }
}
