//! # Palette Templates
//!
//! Blueprints supplied by the component library. Dragging a template from the
//! palette (or clicking "add") instantiates it into a real [`SectionNode`]
//! with freshly minted ids throughout its subtree.

use crate::id_generator::IdGenerator;
use crate::node::{PropertyMap, SectionNode};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Blueprint for a new section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    #[serde(rename = "type", alias = "kind")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, alias = "props")]
    pub properties: PropertyMap,

    #[serde(default, alias = "style")]
    pub presentation_overrides: PropertyMap,

    /// Default subtree; `Some` makes instances containers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Template>>,
}

impl Template {
    pub fn leaf(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            display_name: None,
            properties: PropertyMap::new(),
            presentation_overrides: PropertyMap::new(),
            children: None,
        }
    }

    pub fn container(kind: impl Into<String>, children: Vec<Template>) -> Self {
        Self {
            children: Some(children),
            ..Self::leaf(kind)
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Build a node from this template, minting an id for every node
    pub fn instantiate(&self, ids: &mut IdGenerator) -> SectionNode {
        SectionNode {
            id: ids.new_id(),
            kind: self.kind.clone(),
            display_name: self.display_name.clone(),
            properties: self.properties.clone(),
            presentation_overrides: self.presentation_overrides.clone(),
            children: self
                .children
                .as_ref()
                .map(|children| children.iter().map(|t| t.instantiate(ids)).collect()),
        }
    }
}

/// Ordered registry of templates keyed by kind
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    templates: Vec<Template>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storefront defaults
    pub fn builtin() -> Self {
        let column = || Template::container("column", vec![]);

        let mut palette = Self::new();
        palette.register(
            Template::container(
                "hero-slider",
                vec![Template::leaf("image")
                    .with_property("src", json!(""))
                    .with_property("alt", json!("Slide"))],
            )
            .with_display_name("Hero slider")
            .with_property("autoplay", json!(true))
            .with_property("interval", json!(5000)),
        );
        palette.register(
            Template::container("grid", vec![column(), column(), column()])
                .with_property("columns", json!(3))
                .with_property("gap", json!(16)),
        );
        palette.register(column());
        palette.register(
            Template::leaf("heading")
                .with_property("text", json!("Heading"))
                .with_property("level", json!(2)),
        );
        palette.register(Template::leaf("text").with_property("text", json!("")));
        palette.register(
            Template::leaf("image")
                .with_property("src", json!(""))
                .with_property("alt", json!("")),
        );
        palette.register(
            Template::leaf("button")
                .with_property("label", json!("Shop now"))
                .with_property("href", json!("/products")),
        );
        palette.register(Template::leaf("spacer").with_property("height", json!(32)));
        palette
    }

    /// Add a template, replacing any existing template of the same kind
    pub fn register(&mut self, template: Template) {
        match self.templates.iter_mut().find(|t| t.kind == template.kind) {
            Some(existing) => *existing = template,
            None => self.templates.push(template),
        }
    }

    pub fn get(&self, kind: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.kind == kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(|t| t.kind.as_str())
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
