//! Wire shapes of Storefront API responses and their conversion into
//! domain types. Only the fields the storefront consumes are declared.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use storefront_core::domain::{
    AccessTokenCreatePayload, CustomerCreatePayload, CustomerRecoverPayload,
    CustomerUpdatePayload, Menu, MenuItem, Shop,
};

#[derive(Debug, Deserialize)]
pub(crate) struct GraphqlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphqlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Nodes<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

// ---------------------------------------------------------------------------
// Shop
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct ShopData {
    pub shop: ShopNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ShopNode {
    pub name: String,
    pub primary_domain: PrimaryDomain,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PrimaryDomain {
    pub url: String,
}

impl From<ShopNode> for Shop {
    fn from(node: ShopNode) -> Self {
        Shop {
            name: node.name,
            primary_domain_url: node.primary_domain.url,
        }
    }
}

// ---------------------------------------------------------------------------
// Menu
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct MenuData {
    pub menu: Option<MenuNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MenuNode {
    pub id: String,
    #[serde(default)]
    pub items: Vec<MenuItemNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MenuItemNode {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub url: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<MenuItemNode>>,
}

impl MenuItemNode {
    fn into_leaf(self) -> MenuItem {
        if self.items.as_ref().is_some_and(|items| !items.is_empty()) {
            debug!("Menu item {} nested below the second level, children dropped", self.id);
        }
        MenuItem {
            id: self.id,
            title: self.title,
            url: self.url,
            children: Vec::new(),
        }
    }
}

impl From<MenuItemNode> for MenuItem {
    fn from(node: MenuItemNode) -> Self {
        let children = node
            .items
            .unwrap_or_default()
            .into_iter()
            .map(MenuItemNode::into_leaf)
            .collect();
        MenuItem {
            id: node.id,
            title: node.title,
            url: node.url,
            children,
        }
    }
}

impl From<MenuNode> for Menu {
    fn from(node: MenuNode) -> Self {
        Menu {
            id: node.id,
            items: node.items.into_iter().map(MenuItem::from).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct CollectionsData {
    pub collections: Nodes<Value>,
}

// ---------------------------------------------------------------------------
// Customer mutations
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AccessTokenCreateData {
    pub customer_access_token_create: Option<AccessTokenCreatePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CustomerCreateData {
    pub customer_create: Option<CustomerCreatePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CustomerRecoverData {
    pub customer_recover: Option<CustomerRecoverPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CustomerUpdateData {
    pub customer_update: Option<CustomerUpdatePayload>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_menu_depth_is_capped_at_one() {
        let node: MenuNode = serde_json::from_value(json!({
            "id": "menu",
            "items": [{
                "id": "a",
                "title": "Bags",
                "url": "/bags",
                "items": [{
                    "id": "b",
                    "title": "Totes",
                    "url": "/totes",
                    "items": [{"id": "c", "title": "Deep", "url": "/deep"}]
                }]
            }]
        }))
        .unwrap();

        let menu = Menu::from(node);
        assert_eq!(menu.items[0].children.len(), 1);
        assert!(menu.items[0].children[0].children.is_empty());
    }

    #[test]
    fn test_null_fields_are_tolerated() {
        let node: MenuItemNode =
            serde_json::from_value(json!({"id": "x", "title": "X", "url": null, "items": null}))
                .unwrap();
        let item = MenuItem::from(node);
        assert!(item.url.is_none());
        assert!(item.children.is_empty());
    }
}
