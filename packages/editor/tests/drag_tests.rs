//! Drag-and-drop tests through the edit session
//!
//! This tests:
//! - Hover resolution over a pointer sweep
//! - Self/descendant drop refusal
//! - Same-parent reorders (post-removal index)
//! - Palette drops and cancellation

use storefront_editor::locator::find;
use storefront_editor::{
    BoundingBox, DropTarget, EditSession, EditorConfig, LayoutTree, SectionNode, Template,
};

fn storefront() -> LayoutTree {
    LayoutTree::new(vec![
        SectionNode::container("hero", "hero-slider")
            .with_children(vec![SectionNode::leaf("slide-1", "image")]),
        SectionNode::container("grid", "grid").with_children(vec![
            SectionNode::container("col-1", "column").with_children(vec![
                SectionNode::leaf("title", "heading"),
                SectionNode::leaf("buy", "button"),
                SectionNode::leaf("price", "text"),
            ]),
            SectionNode::container("col-2", "column"),
        ]),
        SectionNode::leaf("cta", "button"),
    ])
}

fn session() -> EditSession {
    EditSession::new("home", storefront(), EditorConfig::strict().with_id_seed("d"))
}

fn child_ids(session: &EditSession, parent: &str) -> Vec<String> {
    find(session.current(), parent)
        .unwrap()
        .children()
        .iter()
        .map(|c| c.id.clone())
        .collect()
}

fn root_ids(session: &EditSession) -> Vec<String> {
    session.current().roots.iter().map(|n| n.id.clone()).collect()
}

const ROW: BoundingBox = BoundingBox {
    top: 200.0,
    height: 48.0,
};

#[test]
fn test_pointer_sweep_yields_two_indices() {
    let mut session = session();
    session.begin_drag_node("cta").unwrap();

    let mut seen = Vec::new();
    let mut y = ROW.top;
    while y <= ROW.top + ROW.height {
        let target = session.update_hover_target("buy", y, ROW).unwrap().unwrap();
        assert_eq!(target.parent_id.as_deref(), Some("col-1"));
        if !seen.contains(&target.index) {
            seen.push(target.index);
        }
        y += 0.5;
    }

    assert_eq!(seen, vec![1, 2]);
}

#[test]
fn test_hover_never_targets_own_subtree() {
    let mut session = session();
    session.begin_drag_node("grid").unwrap();

    for candidate in ["col-1", "col-2", "title", "buy", "price"] {
        for y in [ROW.top, ROW.top + ROW.height] {
            assert_eq!(session.update_hover_target(candidate, y, ROW).unwrap(), None);
            assert!(session.drag().current_target().is_none());
        }
    }
    assert_eq!(session.hover_inside("col-2").unwrap(), None);

    assert!(!session.commit_drop().unwrap());
    assert_eq!(session.current(), &storefront());
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_hover_on_dragged_node_itself_yields_no_target() {
    let mut session = session();
    session.begin_drag_node("col-2").unwrap();

    assert_eq!(session.hover_inside("col-2").unwrap(), None);
    assert!(session.drag().current_target().is_none());

    assert!(!session.commit_drop().unwrap());
    assert_eq!(session.current(), &storefront());
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_drop_after_next_sibling_moves_one_down() {
    let mut session = session();
    session.begin_drag_node("title").unwrap();

    // lower half of "buy" → pre-removal index 2
    let target = session.update_hover_target("buy", 240.0, ROW).unwrap();
    assert_eq!(target, Some(DropTarget::new(Some("col-1"), 2)));

    assert!(session.commit_drop().unwrap());
    assert_eq!(child_ids(&session, "col-1"), vec!["buy", "title", "price"]);
}

#[test]
fn test_drop_before_earlier_sibling() {
    let mut session = session();
    session.begin_drag_node("price").unwrap();
    session.update_hover_target("title", 205.0, ROW).unwrap();

    assert!(session.commit_drop().unwrap());
    assert_eq!(child_ids(&session, "col-1"), vec!["price", "title", "buy"]);
}

#[test]
fn test_drop_on_own_position_commits_nothing() {
    let mut session = session();

    for y in [205.0, 240.0] {
        session.begin_drag_node("buy").unwrap();
        session.update_hover_target("buy", y, ROW).unwrap();
        assert!(!session.commit_drop().unwrap());
    }

    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_drop_into_empty_container() {
    let mut session = session();
    session.begin_drag_node("cta").unwrap();

    assert_eq!(
        session.hover_inside("col-2").unwrap(),
        Some(DropTarget::new(Some("col-2"), 0))
    );
    assert!(session.commit_drop().unwrap());

    assert_eq!(child_ids(&session, "col-2"), vec!["cta"]);
    assert_eq!(root_ids(&session), vec!["hero", "grid"]);
    assert!(!session.drag().is_dragging());
}

#[test]
fn test_drop_across_levels_to_top() {
    let mut session = session();
    session.begin_drag_node("buy").unwrap();
    session.update_hover_target("hero", 240.0, ROW).unwrap();

    assert!(session.commit_drop().unwrap());

    assert_eq!(root_ids(&session), vec!["hero", "buy", "grid", "cta"]);
    assert_eq!(child_ids(&session, "col-1"), vec!["title", "price"]);
}

#[test]
fn test_palette_drop_instantiates_fresh_ids() {
    let mut session = session();
    let template = Template::container("column", vec![Template::leaf("text")]);

    session.begin_drag_template(template.clone());
    session.hover_inside("col-2").unwrap();
    assert!(session.commit_drop().unwrap());

    session.begin_drag_template(template);
    session.update_hover_target("cta", 205.0, ROW).unwrap();
    assert!(session.commit_drop().unwrap());

    assert_eq!(child_ids(&session, "col-2"), vec!["d-1"]);
    assert_eq!(child_ids(&session, "d-1"), vec!["d-2"]);
    assert_eq!(root_ids(&session), vec!["hero", "grid", "d-3", "cta"]);
    assert_eq!(session.selected_id(), Some("d-3"));
}

#[test]
fn test_cancel_drag_leaves_tree_untouched() {
    let mut session = session();
    session.begin_drag_node("cta").unwrap();
    session.update_hover_target("hero", 205.0, ROW).unwrap();

    session.cancel_drag();

    assert!(!session.commit_drop().unwrap());
    assert_eq!(session.current(), &storefront());
}

#[test]
fn test_drop_is_undoable() {
    let mut session = session();
    session.begin_drag_node("cta").unwrap();
    session.update_hover_target("hero", 205.0, ROW).unwrap();
    session.commit_drop().unwrap();
    assert_eq!(root_ids(&session), vec!["cta", "hero", "grid"]);

    assert!(session.undo());
    assert_eq!(session.current(), &storefront());
    assert_eq!(session.history().redo_description(), Some("Relocate cta"));
}
