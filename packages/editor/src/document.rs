//! # Layout Document
//!
//! Load/save boundary for one homepage layout.
//!
//! A document is either:
//! - **Memory-backed**: built from a JSON string or a tree, for tests and previews
//! - **File-backed**: read from and written to a JSON file on disk
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Normalize → Session (edit, undo, redo) → Save
//!   ↓        ↓                 ↓                    ↓
//! JSON   unique ids      history snapshots        JSON
//! ```
//!
//! Loading never trusts ids: any id that occurs more than once is re-minted
//! for every occurrence after the first.

use crate::{EditSession, EditorConfig, EditorError};
use serde_json::json;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use storefront_model::{collect_ids, IdGenerator, LayoutTree, Palette, SectionNode};
use tracing::{info, warn};

/// A homepage layout and where it lives
#[derive(Debug)]
pub struct LayoutDocument {
    pub path: PathBuf,

    storage: DocumentStorage,
}

#[derive(Debug)]
pub enum DocumentStorage {
    Memory { tree: LayoutTree },

    File { tree: LayoutTree, dirty: bool },
}

impl LayoutDocument {
    /// Memory-backed document from JSON text
    pub fn from_json(path: PathBuf, json: &str) -> Result<Self, EditorError> {
        let tree = LayoutTree::from_json(json)?;
        Ok(Self::from_tree(path, tree))
    }

    /// Memory-backed document from an existing tree (ids are normalized)
    pub fn from_tree(path: PathBuf, tree: LayoutTree) -> Self {
        let (tree, _) = normalize(&path, tree);
        Self {
            path,
            storage: DocumentStorage::Memory { tree },
        }
    }

    /// File-backed document. A missing file yields the default homepage.
    pub fn load(path: PathBuf) -> Result<Self, EditorError> {
        let (tree, dirty) = if path.exists() {
            let source = std::fs::read_to_string(&path)?;
            normalize(&path, LayoutTree::from_json(&source)?)
        } else {
            info!(path = %path.display(), "No saved layout; using default homepage");
            (default_tree(&mut IdGenerator::new(&document_name(&path))), true)
        };

        Ok(Self {
            path,
            storage: DocumentStorage::File { tree, dirty },
        })
    }

    pub fn tree(&self) -> &LayoutTree {
        match &self.storage {
            DocumentStorage::Memory { tree } => tree,
            DocumentStorage::File { tree, .. } => tree,
        }
    }

    /// Replace the stored tree (e.g. with a session's current snapshot)
    pub fn set_tree(&mut self, next: LayoutTree) {
        match &mut self.storage {
            DocumentStorage::Memory { tree } => *tree = next,
            DocumentStorage::File { tree, dirty } => {
                *tree = next;
                *dirty = true;
            }
        }
    }

    pub fn is_dirty(&self) -> bool {
        match &self.storage {
            DocumentStorage::File { dirty, .. } => *dirty,
            DocumentStorage::Memory { .. } => false,
        }
    }

    pub fn is_file_backed(&self) -> bool {
        matches!(self.storage, DocumentStorage::File { .. })
    }

    /// Write the tree to disk as pretty JSON (file-backed only)
    pub fn save(&mut self) -> Result<(), EditorError> {
        match &mut self.storage {
            DocumentStorage::File { tree, dirty } => {
                std::fs::write(&self.path, tree.to_json_pretty()?)?;
                *dirty = false;
                info!(path = %self.path.display(), nodes = tree.node_count(), "Saved layout");
                Ok(())
            }
            DocumentStorage::Memory { .. } => Err(EditorError::NotFileBacked),
        }
    }

    /// Start an editing session seeded with this document's tree
    pub fn session(&self, config: EditorConfig) -> EditSession {
        EditSession::new(document_name(&self.path), self.tree().clone(), config)
    }
}

fn document_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Returns the tree and whether any id had to be re-minted.
fn normalize(path: &Path, mut tree: LayoutTree) -> (LayoutTree, bool) {
    let mut ids = IdGenerator::new(&document_name(path));
    for id in collect_ids(&tree) {
        ids.observe(&id);
    }

    let reminted = dedupe_ids(&mut tree, &mut ids);
    if reminted > 0 {
        warn!(path = %path.display(), reminted, "Re-minted duplicate node ids on load");
    }
    (tree, reminted > 0)
}

/// Give every repeated id after its first pre-order occurrence a fresh id.
///
/// `ids` must already have observed every id in the tree. Returns the
/// number of re-minted nodes.
pub fn dedupe_ids(tree: &mut LayoutTree, ids: &mut IdGenerator) -> usize {
    fn walk(nodes: &mut [SectionNode], seen: &mut HashSet<String>, ids: &mut IdGenerator) -> usize {
        let mut reminted = 0;
        for node in nodes {
            if !seen.insert(node.id.clone()) {
                node.id = ids.new_id();
                seen.insert(node.id.clone());
                reminted += 1;
            }
            if let Some(children) = node.children.as_mut() {
                reminted += walk(children, seen, ids);
            }
        }
        reminted
    }

    walk(&mut tree.roots, &mut HashSet::new(), ids)
}

/// Homepage used when nothing has been saved yet
pub fn default_tree(ids: &mut IdGenerator) -> LayoutTree {
    let palette = Palette::builtin();
    let mut roots = Vec::new();

    if let Some(hero) = palette.get("hero-slider") {
        roots.push(hero.instantiate(ids));
    }

    if let (Some(grid), Some(heading), Some(button)) =
        (palette.get("grid"), palette.get("heading"), palette.get("button"))
    {
        let mut grid = grid.instantiate(ids).with_display_name("Featured products");
        if let Some(columns) = grid.children_mut() {
            for (n, column) in columns.iter_mut().enumerate() {
                let title = heading
                    .instantiate(ids)
                    .with_property("text", json!(format!("Product {}", n + 1)));
                column.children = Some(vec![title, button.instantiate(ids)]);
            }
        }
        roots.push(grid);
    }

    LayoutTree::new(roots)
}
