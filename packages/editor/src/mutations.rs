//! # Tree Mutations
//!
//! Pure operations on layout trees: every function takes a tree by reference
//! and returns a new tree. The caller (usually the history) decides whether
//! the result is committed.
//!
//! ## Mutation Semantics
//!
//! ### Remove
//! - Removes the node and all its descendants, at any depth
//! - Fails with `NodeNotFound` if the id is absent
//!
//! ### Insert
//! - `None` parent splices into the top-level sections
//! - Index is clamped to `[0, len]`, so dropping past the end appends
//! - Fails with `ParentNotFound` if the parent is absent or a leaf
//! - Fails with `DuplicateId` if any id of the new subtree already exists
//!
//! ### Move
//! - Swaps with the neighbour in the sibling list, at any depth
//! - Already at the boundary: returns an unchanged copy
//!
//! ### Relocate
//! - Remove followed by Insert; the index is in post-removal coordinates
//! - Fails with `InvalidRelocation` if the target parent is the node itself
//!   or inside its subtree

use crate::locator;
use serde::{Deserialize, Serialize};
use storefront_model::{collect_subtree_ids, LayoutTree, PropertyMap, SectionNode};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Parent not found or not a container: {0}")]
    ParentNotFound(String),

    #[error("Cannot move {node_id} into itself or its descendant {parent_id}")]
    InvalidRelocation { node_id: String, parent_id: String },

    #[error("Duplicate node id: {0}")]
    DuplicateId(String),
}

/// Direction for single-step reordering among siblings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Replacement data for the inspector. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePatch {
    pub properties: Option<PropertyMap>,
    pub presentation_overrides: Option<PropertyMap>,
    pub display_name: Option<Option<String>>,
}

/// Remove a node; returns the new tree and the detached subtree
pub fn remove_node(tree: &LayoutTree, id: &str) -> Result<(LayoutTree, SectionNode), MutationError> {
    let mut next = tree.clone();
    let removed = take_node(&mut next.roots, id)
        .ok_or_else(|| MutationError::NodeNotFound(id.to_string()))?;
    Ok((next, removed))
}

/// Remove a node and its subtree
pub fn remove(tree: &LayoutTree, id: &str) -> Result<LayoutTree, MutationError> {
    remove_node(tree, id).map(|(next, _)| next)
}

/// Insert `node` under `parent_id` (or at the top level) at a clamped index
pub fn insert(
    tree: &LayoutTree,
    parent_id: Option<&str>,
    index: usize,
    node: SectionNode,
) -> Result<LayoutTree, MutationError> {
    for id in collect_subtree_ids(&node) {
        if locator::contains(tree, &id) {
            return Err(MutationError::DuplicateId(id));
        }
    }

    let mut next = tree.clone();
    let siblings = match parent_id {
        None => &mut next.roots,
        Some(parent_id) => find_mut(&mut next.roots, parent_id)
            .and_then(|parent| parent.children.as_mut())
            .ok_or_else(|| MutationError::ParentNotFound(parent_id.to_string()))?,
    };

    let insert_index = index.min(siblings.len());
    siblings.insert(insert_index, node);
    Ok(next)
}

/// Swap a node with its neighbour in the given direction
pub fn move_node(tree: &LayoutTree, id: &str, direction: Direction) -> Result<LayoutTree, MutationError> {
    let mut next = tree.clone();
    let (siblings, index) = sibling_list_mut(&mut next.roots, id)
        .ok_or_else(|| MutationError::NodeNotFound(id.to_string()))?;

    let neighbour = match direction {
        Direction::Up => index.checked_sub(1),
        Direction::Down => Some(index + 1).filter(|&i| i < siblings.len()),
    };

    if let Some(neighbour) = neighbour {
        siblings.swap(index, neighbour);
    }

    Ok(next)
}

/// Detach a node and reattach it under `parent_id` at `index`.
///
/// `index` is interpreted against the tree *after* the node was removed.
pub fn relocate(
    tree: &LayoutTree,
    id: &str,
    parent_id: Option<&str>,
    index: usize,
) -> Result<LayoutTree, MutationError> {
    if let Some(parent_id) = parent_id {
        if locator::is_self_or_descendant(tree, id, parent_id) {
            return Err(MutationError::InvalidRelocation {
                node_id: id.to_string(),
                parent_id: parent_id.to_string(),
            });
        }
    }

    let (detached, node) = remove_node(tree, id)?;
    insert(&detached, parent_id, index, node)
}

/// Replace a node's properties, overrides or label
pub fn update_node(tree: &LayoutTree, id: &str, patch: NodePatch) -> Result<LayoutTree, MutationError> {
    let mut next = tree.clone();
    let node = find_mut(&mut next.roots, id)
        .ok_or_else(|| MutationError::NodeNotFound(id.to_string()))?;

    if let Some(properties) = patch.properties {
        node.properties = properties;
    }
    if let Some(overrides) = patch.presentation_overrides {
        node.presentation_overrides = overrides;
    }
    if let Some(display_name) = patch.display_name {
        node.display_name = display_name;
    }

    Ok(next)
}

fn take_node(siblings: &mut Vec<SectionNode>, id: &str) -> Option<SectionNode> {
    if let Some(pos) = siblings.iter().position(|n| n.id == id) {
        return Some(siblings.remove(pos));
    }

    siblings
        .iter_mut()
        .find_map(|node| node.children.as_mut().and_then(|children| take_node(children, id)))
}

fn find_mut<'a>(siblings: &'a mut [SectionNode], id: &str) -> Option<&'a mut SectionNode> {
    siblings.iter_mut().find_map(|node| {
        if node.id == id {
            Some(node)
        } else {
            node.children.as_mut().and_then(|children| find_mut(children, id))
        }
    })
}

fn sibling_list_mut<'a>(
    siblings: &'a mut Vec<SectionNode>,
    id: &str,
) -> Option<(&'a mut Vec<SectionNode>, usize)> {
    match siblings.iter().position(|n| n.id == id) {
        Some(index) => Some((siblings, index)),
        None => siblings
            .iter_mut()
            .find_map(|node| node.children.as_mut().and_then(|children| sibling_list_mut(children, id))),
    }
}

/// Semantic edit operations on a layout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Remove a node and its subtree
    Remove { node_id: String },

    /// Insert an already-built node (ids must be fresh)
    Insert {
        parent_id: Option<String>,
        index: usize,
        node: SectionNode,
    },

    /// Swap with the previous/next sibling
    Move { node_id: String, direction: Direction },

    /// Detach and reattach; index is post-removal
    Relocate {
        node_id: String,
        parent_id: Option<String>,
        index: usize,
    },

    /// Replace the content properties
    SetProperties {
        node_id: String,
        properties: PropertyMap,
    },

    /// Replace the presentation overrides
    SetPresentation {
        node_id: String,
        overrides: PropertyMap,
    },

    /// Rename in the structure outline
    SetDisplayName {
        node_id: String,
        display_name: Option<String>,
    },
}

impl Mutation {
    /// Apply to a tree, producing a new tree
    pub fn apply(&self, tree: &LayoutTree) -> Result<LayoutTree, MutationError> {
        match self {
            Mutation::Remove { node_id } => remove(tree, node_id),

            Mutation::Insert { parent_id, index, node } => {
                insert(tree, parent_id.as_deref(), *index, node.clone())
            }

            Mutation::Move { node_id, direction } => move_node(tree, node_id, *direction),

            Mutation::Relocate { node_id, parent_id, index } => {
                relocate(tree, node_id, parent_id.as_deref(), *index)
            }

            Mutation::SetProperties { node_id, properties } => update_node(
                tree,
                node_id,
                NodePatch {
                    properties: Some(properties.clone()),
                    ..NodePatch::default()
                },
            ),

            Mutation::SetPresentation { node_id, overrides } => update_node(
                tree,
                node_id,
                NodePatch {
                    presentation_overrides: Some(overrides.clone()),
                    ..NodePatch::default()
                },
            ),

            Mutation::SetDisplayName { node_id, display_name } => update_node(
                tree,
                node_id,
                NodePatch {
                    display_name: Some(display_name.clone()),
                    ..NodePatch::default()
                },
            ),
        }
    }

    /// Validate without applying
    pub fn validate(&self, tree: &LayoutTree) -> Result<(), MutationError> {
        match self {
            Mutation::Insert { parent_id, node, .. } => {
                if let Some(parent_id) = parent_id {
                    locator::find(tree, parent_id)
                        .filter(|parent| parent.is_container())
                        .ok_or_else(|| MutationError::ParentNotFound(parent_id.clone()))?;
                }

                match collect_subtree_ids(node)
                    .into_iter()
                    .find(|id| locator::contains(tree, id))
                {
                    Some(id) => Err(MutationError::DuplicateId(id)),
                    None => Ok(()),
                }
            }

            Mutation::Relocate { node_id, parent_id, .. } => {
                if !locator::contains(tree, node_id) {
                    return Err(MutationError::NodeNotFound(node_id.clone()));
                }

                if let Some(parent_id) = parent_id {
                    if locator::is_self_or_descendant(tree, node_id, parent_id) {
                        return Err(MutationError::InvalidRelocation {
                            node_id: node_id.clone(),
                            parent_id: parent_id.clone(),
                        });
                    }

                    locator::find(tree, parent_id)
                        .filter(|parent| parent.is_container())
                        .ok_or_else(|| MutationError::ParentNotFound(parent_id.clone()))?;
                }

                Ok(())
            }

            Mutation::Remove { node_id }
            | Mutation::Move { node_id, .. }
            | Mutation::SetProperties { node_id, .. }
            | Mutation::SetPresentation { node_id, .. }
            | Mutation::SetDisplayName { node_id, .. } => {
                if locator::contains(tree, node_id) {
                    Ok(())
                } else {
                    Err(MutationError::NodeNotFound(node_id.clone()))
                }
            }
        }
    }

    /// Short label used for history entries
    pub fn describe(&self) -> String {
        match self {
            Mutation::Remove { node_id } => format!("Remove {}", node_id),
            Mutation::Insert { node, .. } => format!("Insert {}", node.kind),
            Mutation::Move { node_id, direction } => format!("Move {} {:?}", node_id, direction),
            Mutation::Relocate { node_id, .. } => format!("Relocate {}", node_id),
            Mutation::SetProperties { node_id, .. } => format!("Edit properties of {}", node_id),
            Mutation::SetPresentation { node_id, .. } => format!("Edit style of {}", node_id),
            Mutation::SetDisplayName { node_id, .. } => format!("Rename {}", node_id),
        }
    }
}
