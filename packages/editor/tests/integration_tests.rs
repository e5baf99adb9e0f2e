//! Integration tests for editor crate

use storefront_editor::locator;
use storefront_editor::{EditorConfig, EditorError, LayoutDocument, LayoutTree};
use tempfile::TempDir;

#[test]
fn test_document_lifecycle() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("homepage.json");

    // Missing file yields the default homepage
    let mut doc = LayoutDocument::load(path.clone())?;
    assert!(doc.is_file_backed());
    assert!(doc.is_dirty());
    assert!(!doc.tree().is_empty());

    // Edit through a session
    let mut session = doc.session(EditorConfig::strict());
    let heading = session.add_from_palette("heading", None, 0)?.unwrap();
    assert!(locator::duplicate_ids(session.current()).is_empty());

    // Save and reload
    doc.set_tree(session.current().clone());
    doc.save()?;
    assert!(!doc.is_dirty());

    let reloaded = LayoutDocument::load(path)?;
    assert_eq!(reloaded.tree(), session.current());
    assert_eq!(reloaded.tree().roots[0].id, heading);

    Ok(())
}

#[test]
fn test_new_ids_never_collide_with_loaded_ids() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("homepage.json");

    let doc = LayoutDocument::load(path.clone())?;
    let mut session = doc.session(EditorConfig::strict());
    for _ in 0..3 {
        session.add_from_palette("grid", None, 0)?;
    }

    assert!(locator::duplicate_ids(session.current()).is_empty());
    Ok(())
}

#[test]
fn test_loading_duplicate_ids_marks_document_dirty() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("homepage.json");
    std::fs::write(&path, r#"[{ "id": "x", "type": "text" }, { "id": "x", "type": "button" }]"#)?;

    let mut doc = LayoutDocument::load(path.clone())?;
    assert!(doc.is_dirty());
    assert_eq!(doc.tree().roots[0].id, "x");
    assert_ne!(doc.tree().roots[1].id, "x");

    doc.save()?;
    let reloaded = LayoutDocument::load(path)?;
    assert!(!reloaded.is_dirty());
    assert!(locator::duplicate_ids(reloaded.tree()).is_empty());
    Ok(())
}

#[test]
fn test_saved_json_shape() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("homepage.json");
    std::fs::write(
        &path,
        r#"[{ "id": "g", "type": "grid", "properties": { "columns": 2 }, "children": [
              { "id": "t", "type": "text" }
           ] }]"#,
    )?;

    let mut doc = LayoutDocument::load(path.clone())?;
    let mut session = doc.session(EditorConfig::strict());
    session.set_display_name("t", Some("Intro".to_string()))?;
    doc.set_tree(session.current().clone());
    doc.save()?;

    let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(value[0]["type"], "grid");
    assert_eq!(value[0]["properties"]["columns"], 2);
    assert_eq!(value[0]["children"][0]["displayName"], "Intro");
    assert!(value[0]["children"][0].get("children").is_none());

    Ok(())
}

#[test]
fn test_invalid_json_is_an_error() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("homepage.json");
    std::fs::write(&path, "{ not json")?;

    assert!(matches!(
        LayoutDocument::load(path),
        Err(EditorError::Model(_))
    ));
    Ok(())
}

#[test]
fn test_lenient_session_survives_stale_ids() {
    let doc = LayoutDocument::from_tree("home.json".into(), LayoutTree::empty());
    let mut session = doc.session(EditorConfig::lenient());

    assert!(!session.remove("stale").unwrap());
    assert!(!session.begin_drag_node("stale").unwrap());
    assert!(!session.set_display_name("stale", None).unwrap());
    assert_eq!(session.history().len(), 1);
}
