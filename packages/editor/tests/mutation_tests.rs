//! Tree mutation tests

use storefront_editor::locator::{self, find};
use storefront_editor::mutations::{insert, move_node, relocate, remove, remove_node};
use storefront_editor::{Direction, LayoutTree, Mutation, MutationError, SectionNode};

fn a_b_c() -> LayoutTree {
    LayoutTree::new(vec![SectionNode::container("A", "column").with_children(vec![
        SectionNode::leaf("B", "text"),
        SectionNode::leaf("C", "button"),
    ])])
}

fn storefront() -> LayoutTree {
    LayoutTree::new(vec![
        SectionNode::container("hero", "hero-slider").with_children(vec![
            SectionNode::leaf("slide-1", "image"),
            SectionNode::leaf("slide-2", "image"),
        ]),
        SectionNode::container("grid", "grid").with_children(vec![
            SectionNode::container("col-1", "column").with_children(vec![
                SectionNode::leaf("title-1", "heading"),
                SectionNode::leaf("buy-1", "button"),
            ]),
            SectionNode::container("col-2", "column").with_children(vec![
                SectionNode::leaf("title-2", "heading"),
            ]),
            SectionNode::container("col-3", "column"),
        ]),
        SectionNode::leaf("footer-cta", "button"),
    ])
}

fn child_ids(tree: &LayoutTree, parent: &str) -> Vec<String> {
    find(tree, parent)
        .unwrap()
        .children()
        .iter()
        .map(|c| c.id.clone())
        .collect()
}

#[test]
fn test_remove_insert_move_scenario() {
    let tree = a_b_c();

    let (removed, b) = remove_node(&tree, "B").unwrap();
    assert_eq!(child_ids(&removed, "A"), vec!["C"]);

    let restored = insert(&removed, Some("A"), 0, b).unwrap();
    assert_eq!(child_ids(&restored, "A"), vec!["B", "C"]);
    assert_eq!(restored, tree);

    let moved = move_node(&restored, "C", Direction::Up).unwrap();
    assert_eq!(child_ids(&moved, "A"), vec!["C", "B"]);
}

#[test]
fn test_reattaching_removed_subtree_preserves_node_count() {
    let tree = storefront();
    let total = tree.node_count();

    for id in ["slide-2", "col-1", "grid", "footer-cta", "title-2"] {
        let (detached, node) = remove_node(&tree, id).unwrap();
        assert_eq!(detached.node_count() + node.subtree_len(), total);

        for (parent, index) in [(None, 0), (None, 99), (Some("hero"), 1)] {
            if parent.is_some_and(|p| locator::find(&detached, p).is_none()) {
                continue;
            }
            let reattached = insert(&detached, parent, index, node.clone()).unwrap();
            assert_eq!(reattached.node_count(), total, "moving {} to {:?}", id, parent);
            assert!(locator::contains(&reattached, id));
            assert!(locator::duplicate_ids(&reattached).is_empty());
        }
    }
}

#[test]
fn test_move_up_on_first_sibling_is_structurally_equal() {
    let tree = storefront();

    for first in ["hero", "slide-1", "col-1", "title-1"] {
        assert_eq!(move_node(&tree, first, Direction::Up).unwrap(), tree);
    }
}

#[test]
fn test_move_down_deeply_nested() {
    let moved = move_node(&storefront(), "title-1", Direction::Down).unwrap();
    assert_eq!(child_ids(&moved, "col-1"), vec!["buy-1", "title-1"]);
}

#[test]
fn test_move_unknown_id_fails() {
    assert_eq!(
        move_node(&storefront(), "nope", Direction::Down),
        Err(MutationError::NodeNotFound("nope".to_string()))
    );
}

#[test]
fn test_remove_container_drops_descendants() {
    let next = remove(&storefront(), "grid").unwrap();

    assert!(!locator::contains(&next, "col-2"));
    assert!(!locator::contains(&next, "title-1"));
    assert_eq!(next.node_count(), 4);
}

#[test]
fn test_relocate_between_containers() {
    let next = relocate(&storefront(), "buy-1", Some("col-3"), 0).unwrap();

    assert_eq!(child_ids(&next, "col-1"), vec!["title-1"]);
    assert_eq!(child_ids(&next, "col-3"), vec!["buy-1"]);
}

#[test]
fn test_relocate_to_top_level() {
    let next = relocate(&storefront(), "col-2", None, 1).unwrap();
    let roots: Vec<&str> = next.roots.iter().map(|n| n.id.as_str()).collect();

    assert_eq!(roots, vec!["hero", "col-2", "grid", "footer-cta"]);
}

#[test]
fn test_relocate_within_same_parent_uses_post_removal_index() {
    // hero, grid, footer-cta → move hero to the end (post-removal index 2)
    let next = relocate(&storefront(), "hero", None, 2).unwrap();
    let roots: Vec<&str> = next.roots.iter().map(|n| n.id.as_str()).collect();

    assert_eq!(roots, vec!["grid", "footer-cta", "hero"]);
}

#[test]
fn test_relocate_into_descendant_fails() {
    let result = relocate(&storefront(), "grid", Some("col-3"), 0);

    assert_eq!(
        result,
        Err(MutationError::InvalidRelocation {
            node_id: "grid".to_string(),
            parent_id: "col-3".to_string(),
        })
    );
}

#[test]
fn test_insert_unknown_parent_fails() {
    let result = insert(&storefront(), Some("ghost"), 0, SectionNode::leaf("n", "text"));
    assert_eq!(result, Err(MutationError::ParentNotFound("ghost".to_string())));
}

#[test]
fn test_mutation_enum_matches_functions() {
    let tree = storefront();

    let via_enum = Mutation::Relocate {
        node_id: "buy-1".to_string(),
        parent_id: Some("col-2".to_string()),
        index: 0,
    }
    .apply(&tree)
    .unwrap();

    assert_eq!(via_enum, relocate(&tree, "buy-1", Some("col-2"), 0).unwrap());
}

#[test]
fn test_mutations_do_not_touch_input() {
    let tree = storefront();
    let snapshot = tree.clone();

    let _ = remove(&tree, "grid");
    let _ = move_node(&tree, "col-2", Direction::Up);
    let _ = relocate(&tree, "slide-1", Some("col-3"), 0);

    assert_eq!(tree, snapshot);
}
