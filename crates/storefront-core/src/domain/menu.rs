// ============================================================================
// Storefront Core - Menu Entities
// File: crates/storefront-core/src/domain/menu.rs
// Description: Navigation menu as returned by the Storefront API
// ============================================================================

use serde::{Deserialize, Serialize};

/// A single navigation entry. `children` is at most one level deep;
/// deeper nesting is cut off where backend data is converted into this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub title: String,
    pub url: Option<String>,
    #[serde(default)]
    pub children: Vec<MenuItem>,
}

impl MenuItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>, url: Option<&str>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: url.map(str::to_string),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<MenuItem>) -> Self {
        self.children = children;
        self
    }

    /// The url when present and non-empty.
    pub fn link(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }

    pub fn is_renderable(&self) -> bool {
        self.link().is_some()
    }
}

/// Menu entity, read-only for the duration of one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    pub id: String,
    pub items: Vec<MenuItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_url_is_not_renderable() {
        assert!(!MenuItem::new("a", "A", Some("")).is_renderable());
        assert!(!MenuItem::new("b", "B", None).is_renderable());
        assert!(MenuItem::new("c", "C", Some("/c")).is_renderable());
    }
}
