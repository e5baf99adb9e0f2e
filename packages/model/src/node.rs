use crate::id_generator::IdGenerator;
use serde::{Deserialize, Serialize};

/// Open key/value bag used for both content properties and style overrides.
///
/// Values are opaque to the engine; only the rendering layer interprets them.
pub type PropertyMap = serde_json::Map<String, serde_json::Value>;

/// One section or element of the homepage layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionNode {
    pub id: String,

    /// Renderable type tag ("grid", "column", "heading", ...)
    #[serde(rename = "type", alias = "kind")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, alias = "props")]
    pub properties: PropertyMap,

    #[serde(default, alias = "style")]
    pub presentation_overrides: PropertyMap,

    /// `None` for leaves, `Some` (possibly empty) for containers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<SectionNode>>,
}

impl SectionNode {
    /// Create a leaf node
    pub fn leaf(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            display_name: None,
            properties: PropertyMap::new(),
            presentation_overrides: PropertyMap::new(),
            children: None,
        }
    }

    /// Create an empty container node
    pub fn container(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            children: Some(Vec::new()),
            ..Self::leaf(id, kind)
        }
    }

    pub fn with_children(mut self, children: Vec<SectionNode>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    pub fn with_override(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.presentation_overrides.insert(key.into(), value);
        self
    }

    pub fn is_container(&self) -> bool {
        self.children.is_some()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Children slice (empty for leaves)
    pub fn children(&self) -> &[SectionNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<SectionNode>> {
        self.children.as_mut()
    }

    /// Label shown in the structure outline
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.kind)
    }

    /// Number of nodes in this subtree, including self
    pub fn subtree_len(&self) -> usize {
        1 + self.children().iter().map(SectionNode::subtree_len).sum::<usize>()
    }

    /// Deep copy with a freshly minted id for every node in the subtree
    pub fn duplicate(&self, ids: &mut IdGenerator) -> SectionNode {
        SectionNode {
            id: ids.new_id(),
            kind: self.kind.clone(),
            display_name: self.display_name.clone(),
            properties: self.properties.clone(),
            presentation_overrides: self.presentation_overrides.clone(),
            children: self
                .children
                .as_ref()
                .map(|children| children.iter().map(|c| c.duplicate(ids)).collect()),
        }
    }
}

/// The whole layout: an ordered sequence of top-level sections
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutTree {
    pub roots: Vec<SectionNode>,
}

impl LayoutTree {
    pub fn new(roots: Vec<SectionNode>) -> Self {
        Self { roots }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total node count across all roots
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(SectionNode::subtree_len).sum()
    }

    pub fn from_json(json: &str) -> Result<Self, crate::ModelError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, crate::ModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_value(&self) -> Result<serde_json::Value, crate::ModelError> {
        Ok(serde_json::to_value(self)?)
    }
}

impl From<Vec<SectionNode>> for LayoutTree {
    fn from(roots: Vec<SectionNode>) -> Self {
        Self::new(roots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_leaf_serializes_without_children() {
        let node = SectionNode::leaf("h1", "heading").with_property("text", json!("Sale"));
        let value = serde_json::to_value(&node).unwrap();

        assert_eq!(value["type"], "heading");
        assert_eq!(value["properties"]["text"], "Sale");
        assert!(value.get("children").is_none());
        assert!(value.get("displayName").is_none());
    }

    #[test]
    fn test_container_keeps_empty_children() {
        let node = SectionNode::container("g", "grid");
        let value = serde_json::to_value(&node).unwrap();

        assert_eq!(value["children"], json!([]));
    }

    #[test]
    fn test_tree_parses_aliases() {
        let json = r#"[
            { "id": "a", "kind": "grid", "props": { "columns": 3 }, "children": [
                { "id": "b", "type": "text", "style": { "color": "red" } }
            ] }
        ]"#;

        let tree = LayoutTree::from_json(json).unwrap();
        assert_eq!(tree.roots.len(), 1);
        assert_eq!(tree.roots[0].kind, "grid");
        assert_eq!(tree.roots[0].properties["columns"], 3);
        assert_eq!(tree.roots[0].children()[0].presentation_overrides["color"], "red");
        assert!(tree.roots[0].children()[0].is_leaf());
        assert_eq!(tree.node_count(), 2);
    }

    #[test]
    fn test_duplicate_mints_fresh_ids() {
        let mut ids = IdGenerator::from_seed("doc".to_string());
        let original = SectionNode::container("a", "column").with_children(vec![
            SectionNode::leaf("b", "text"),
            SectionNode::leaf("c", "button"),
        ]);

        let copy = original.duplicate(&mut ids);

        assert_eq!(copy.id, "doc-1");
        assert_eq!(copy.children()[0].id, "doc-2");
        assert_eq!(copy.children()[1].id, "doc-3");
        assert_eq!(copy.children()[1].kind, "button");
        assert_eq!(original.id, "a");
    }
}
