use crate::locator;
use storefront_model::LayoutTree;

/// The node currently open in the property inspector
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, id: impl Into<String>) {
        self.selected = Some(id.into());
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    /// Drop the selection if its node is gone from `tree`
    pub fn retain_in(&mut self, tree: &LayoutTree) {
        if let Some(id) = &self.selected {
            if !locator::contains(tree, id) {
                self.selected = None;
            }
        }
    }
}
