//! Built-in menus used when the backend returns none

use crate::domain::{Menu, MenuItem};

struct FallbackItem {
    id: &'static str,
    title: &'static str,
    url: &'static str,
}

const HEADER_MENU_ID: &str = "gid://shopify/Menu/199655587896";

const HEADER_ITEMS: &[FallbackItem] = &[
    FallbackItem {
        id: "gid://shopify/MenuItem/461609500728",
        title: "Collections",
        url: "/collections",
    },
    FallbackItem {
        id: "gid://shopify/MenuItem/461609533496",
        title: "Blog",
        url: "/blogs/journal",
    },
    FallbackItem {
        id: "gid://shopify/MenuItem/461609566264",
        title: "Policies",
        url: "/policies",
    },
    FallbackItem {
        id: "gid://shopify/MenuItem/461609599032",
        title: "About",
        url: "/pages/about",
    },
];

const FOOTER_MENU_ID: &str = "gid://shopify/Menu/199655620664";

const FOOTER_ITEMS: &[FallbackItem] = &[
    FallbackItem {
        id: "gid://shopify/MenuItem/461633060920",
        title: "Privacy Policy",
        url: "/policies/privacy-policy",
    },
    FallbackItem {
        id: "gid://shopify/MenuItem/461633093688",
        title: "Refund Policy",
        url: "/policies/refund-policy",
    },
    FallbackItem {
        id: "gid://shopify/MenuItem/461633126456",
        title: "Shipping Policy",
        url: "/policies/shipping-policy",
    },
    FallbackItem {
        id: "gid://shopify/MenuItem/461633159224",
        title: "Terms of Service",
        url: "/policies/terms-of-service",
    },
];

fn materialize(id: &str, items: &[FallbackItem]) -> Menu {
    Menu {
        id: id.to_string(),
        items: items
            .iter()
            .map(|item| MenuItem::new(item.id, item.title, Some(item.url)))
            .collect(),
    }
}

pub fn header_menu() -> Menu {
    materialize(HEADER_MENU_ID, HEADER_ITEMS)
}

pub fn footer_menu() -> Menu {
    materialize(FOOTER_MENU_ID, FOOTER_ITEMS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_menus_are_fully_linkable() {
        for menu in [header_menu(), footer_menu()] {
            assert_eq!(menu.items.len(), 4);
            assert!(menu.items.iter().all(|i| i.is_renderable()));
        }
    }
}
