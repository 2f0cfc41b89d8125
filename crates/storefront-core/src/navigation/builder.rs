// ============================================================================
// Storefront Core - Menu Tree Builder
// File: crates/storefront-core/src/navigation/builder.rs
// Description: Turns a backend menu into renderable navigation entries
// ============================================================================

use serde::Serialize;
use tracing::{debug, warn};

use super::url_resolver::{resolve, KnownDomains, ResolvedLink};
use super::{fallback, NavigationError};
use crate::domain::{Menu, MenuItem};

/// Traversal depth of a navigation instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuMode {
    /// Top-level entries only (footer)
    Flat,
    /// Top-level entries plus one level of children (header dropdowns)
    Nested,
}

/// Entry handed to the navigation renderer. `position` is the render key:
/// backend ids may repeat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderableItem {
    pub position: usize,
    pub id: String,
    pub title: String,
    pub href: String,
    pub is_external: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<RenderableItem>>,
}

impl RenderableItem {
    fn from_link(position: usize, item: &MenuItem, link: ResolvedLink) -> Self {
        let is_external = link.is_external();
        Self {
            position,
            id: item.id.clone(),
            title: item.title.clone(),
            href: link.into_href(),
            is_external,
            children: None,
        }
    }
}

/// Mode and fallback for one navigation instance
#[derive(Debug, Clone)]
pub struct NavigationConfig {
    pub mode: MenuMode,
    pub fallback: Menu,
}

impl NavigationConfig {
    pub fn header() -> Self {
        Self {
            mode: MenuMode::Nested,
            fallback: fallback::header_menu(),
        }
    }

    pub fn footer() -> Self {
        Self {
            mode: MenuMode::Flat,
            fallback: fallback::footer_menu(),
        }
    }
}

pub struct MenuTreeBuilder {
    config: NavigationConfig,
    domains: KnownDomains,
}

impl MenuTreeBuilder {
    pub fn new(config: NavigationConfig, domains: KnownDomains) -> Self {
        Self { config, domains }
    }

    pub fn header(domains: KnownDomains) -> Self {
        Self::new(NavigationConfig::header(), domains)
    }

    pub fn footer(domains: KnownDomains) -> Self {
        Self::new(NavigationConfig::footer(), domains)
    }

    pub fn mode(&self) -> MenuMode {
        self.config.mode
    }

    /// Builds the navigation list, falling back to the built-in menu when
    /// `menu` is missing or none of its items can be rendered.
    pub fn build(&self, menu: Option<&Menu>) -> Vec<RenderableItem> {
        let Some(menu) = menu else {
            debug!("No menu returned, using fallback {}", self.config.fallback.id);
            return self.render(&self.config.fallback);
        };

        let rendered = self.render(menu);
        if rendered.is_empty() {
            debug!("Menu {} has no usable items, using fallback", menu.id);
            return self.render(&self.config.fallback);
        }
        rendered
    }

    fn render(&self, menu: &Menu) -> Vec<RenderableItem> {
        let mut rendered = Vec::with_capacity(menu.items.len());
        for item in &menu.items {
            let Some(url) = item.link() else {
                continue;
            };

            let link = match self.resolve_item(item, url) {
                Ok(link) => link,
                Err(e) => {
                    warn!("Dropping menu item: {}", e);
                    continue;
                }
            };

            let mut entry = RenderableItem::from_link(rendered.len(), item, link);
            if self.config.mode == MenuMode::Nested {
                entry.children = Some(self.build_children(item));
            }
            rendered.push(entry);
        }
        rendered
    }

    /// Children without a url are kept with an empty href; only malformed
    /// internal urls drop a child.
    fn build_children(&self, parent: &MenuItem) -> Vec<RenderableItem> {
        let mut children = Vec::with_capacity(parent.children.len());
        for child in &parent.children {
            let link = match child.link() {
                Some(url) => match self.resolve_item(child, url) {
                    Ok(link) => link,
                    Err(e) => {
                        warn!("Dropping child of menu item {}: {}", parent.id, e);
                        continue;
                    }
                },
                None => ResolvedLink::new(""),
            };
            children.push(RenderableItem::from_link(children.len(), child, link));
        }
        children
    }

    fn resolve_item(&self, item: &MenuItem, url: &str) -> Result<ResolvedLink, NavigationError> {
        resolve(url, &self.domains).map_err(|e| e.for_item(&item.id))
    }
}
