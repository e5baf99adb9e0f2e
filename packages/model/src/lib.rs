//! # Storefront Model
//!
//! Data model for the homepage layout: section nodes, the layout tree,
//! palette templates and id minting.
//!
//! A layout is an ordered list of top-level [`SectionNode`]s. Each node
//! carries an opaque `kind` tag and two open property bags; containers
//! additionally own an ordered `children` list. The model knows nothing about
//! rendering.

pub mod error;
pub mod id_generator;
pub mod node;
pub mod template;
pub mod visitor;

pub use error::ModelError;
pub use id_generator::{get_document_seed, IdGenerator};
pub use node::{LayoutTree, PropertyMap, SectionNode};
pub use template::{Palette, Template};
pub use visitor::{collect_ids, collect_subtree_ids, walk_node, walk_tree, Visitor};
