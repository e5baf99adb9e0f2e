//! # Tree Locator
//!
//! Read-only searches over a [`LayoutTree`]. All lookups are depth-first
//! pre-order and stop at the first match.

use std::collections::HashSet;
use storefront_model::{collect_ids, LayoutTree, SectionNode};

/// A node found in a tree together with its immediate parent
#[derive(Debug, Clone, Copy)]
pub struct Located<'a> {
    pub node: &'a SectionNode,

    /// `None` when the node is a root
    pub parent: Option<&'a SectionNode>,
}

/// Where a node currently sits: its parent id (`None` for roots) and index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub parent_id: Option<String>,
    pub index: usize,
}

impl Position {
    pub fn new(parent_id: Option<&str>, index: usize) -> Self {
        Self {
            parent_id: parent_id.map(str::to_string),
            index,
        }
    }

    pub fn root(index: usize) -> Self {
        Self::new(None, index)
    }
}

/// Find a node and its parent by id
pub fn locate<'a>(tree: &'a LayoutTree, id: &str) -> Option<Located<'a>> {
    locate_in(&tree.roots, None, id)
}

fn locate_in<'a>(
    siblings: &'a [SectionNode],
    parent: Option<&'a SectionNode>,
    id: &str,
) -> Option<Located<'a>> {
    for node in siblings {
        if node.id == id {
            return Some(Located { node, parent });
        }

        if let Some(found) = locate_in(node.children(), Some(node), id) {
            return Some(found);
        }
    }

    None
}

/// Find a node by id
pub fn find<'a>(tree: &'a LayoutTree, id: &str) -> Option<&'a SectionNode> {
    locate(tree, id).map(|located| located.node)
}

pub fn contains(tree: &LayoutTree, id: &str) -> bool {
    locate(tree, id).is_some()
}

/// Current parent id and sibling index of a node
pub fn position(tree: &LayoutTree, id: &str) -> Option<Position> {
    let located = locate(tree, id)?;
    let siblings = match located.parent {
        Some(parent) => parent.children(),
        None => tree.roots.as_slice(),
    };
    let index = siblings.iter().position(|n| n.id == id)?;

    Some(Position {
        parent_id: located.parent.map(|p| p.id.clone()),
        index,
    })
}

/// True if `candidate_id` is `ancestor_id` itself or anywhere in its subtree
pub fn is_self_or_descendant(tree: &LayoutTree, ancestor_id: &str, candidate_id: &str) -> bool {
    if ancestor_id == candidate_id {
        return true;
    }

    match find(tree, ancestor_id) {
        Some(ancestor) => subtree_contains(ancestor, candidate_id),
        None => false,
    }
}

fn subtree_contains(node: &SectionNode, id: &str) -> bool {
    node.children()
        .iter()
        .any(|child| child.id == id || subtree_contains(child, id))
}

/// Total number of nodes in the tree
pub fn node_count(tree: &LayoutTree) -> usize {
    tree.node_count()
}

/// Ids that occur more than once, in order of their second occurrence
pub fn duplicate_ids(tree: &LayoutTree) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();

    for id in collect_ids(tree) {
        if !seen.insert(id.clone()) && !duplicates.contains(&id) {
            duplicates.push(id);
        }
    }

    duplicates
}
