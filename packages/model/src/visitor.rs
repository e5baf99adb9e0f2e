use crate::node::{LayoutTree, SectionNode};

/// Visitor pattern for traversing a layout tree immutably
///
/// The default implementation walks the entire tree in depth-first pre-order.
/// Override `visit_node` to act on each node; call `walk_node` from the
/// override to keep descending.
pub trait Visitor: Sized {
    fn visit_tree(&mut self, tree: &LayoutTree) {
        walk_tree(self, tree);
    }

    fn visit_node(&mut self, node: &SectionNode, depth: usize) {
        walk_node(self, node, depth);
    }
}

pub fn walk_tree<V: Visitor>(visitor: &mut V, tree: &LayoutTree) {
    for root in &tree.roots {
        visitor.visit_node(root, 0);
    }
}

pub fn walk_node<V: Visitor>(visitor: &mut V, node: &SectionNode, depth: usize) {
    for child in node.children() {
        visitor.visit_node(child, depth + 1);
    }
}

/// Collects every node id in pre-order
#[derive(Debug, Default)]
pub struct IdCollector {
    pub ids: Vec<String>,
}

impl Visitor for IdCollector {
    fn visit_node(&mut self, node: &SectionNode, depth: usize) {
        self.ids.push(node.id.clone());
        walk_node(self, node, depth);
    }
}

/// Collect all ids of a tree in pre-order
pub fn collect_ids(tree: &LayoutTree) -> Vec<String> {
    let mut collector = IdCollector::default();
    collector.visit_tree(tree);
    collector.ids
}

/// Collect all ids of a single subtree in pre-order
pub fn collect_subtree_ids(node: &SectionNode) -> Vec<String> {
    let mut collector = IdCollector::default();
    collector.visit_node(node, 0);
    collector.ids
}
