//! Navigation: menu link normalization and header/footer tree construction

pub mod builder;
pub mod fallback;
pub mod url_resolver;

use thiserror::Error;

pub use builder::{MenuMode, MenuTreeBuilder, NavigationConfig, RenderableItem};
pub use url_resolver::{resolve, KnownDomains, ResolvedLink};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Menu url is empty")]
    EmptyUrl,

    #[error("Malformed internal url {url:?}: {reason}")]
    MalformedUrl { url: String, reason: String },

    #[error("Malformed internal url {url:?} on menu item {item_id}: {reason}")]
    MalformedMenuItem {
        item_id: String,
        url: String,
        reason: String,
    },
}

impl NavigationError {
    /// Attaches the offending menu item id.
    pub fn for_item(self, item_id: &str) -> Self {
        match self {
            NavigationError::MalformedUrl { url, reason } => NavigationError::MalformedMenuItem {
                item_id: item_id.to_string(),
                url,
                reason,
            },
            other => other,
        }
    }
}
