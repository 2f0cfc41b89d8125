//! Page loaders: which data each page needs, and which of it is critical

use std::sync::Arc;

use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use serde_json::{json, Value};
use tracing::debug;

use super::page_data::{fetcher, Fetcher, PageDataAssembler, PageDataEnvelope};
use super::session::CustomerSession;
use crate::domain::Shop;
use crate::error::DomainError;
use crate::navigation::{KnownDomains, MenuTreeBuilder};
use crate::ports::StorefrontClient;

pub const KEY_HEADER: &str = "header";
pub const KEY_FOOTER: &str = "footer";
pub const KEY_IS_LOGGED_IN: &str = "isLoggedIn";
pub const KEY_FEATURED_COLLECTION: &str = "featuredCollection";
pub const KEY_RECOMMENDED_PRODUCTS: &str = "recommendedProducts";

type SharedShop = Shared<BoxFuture<'static, Result<Shop, DomainError>>>;

/// Store-specific inputs for the loaders
#[derive(Debug, Clone)]
pub struct LoaderSettings {
    pub public_store_domain: String,
    pub extra_known_domains: Vec<String>,
    pub header_menu_handle: String,
    pub footer_menu_handle: String,
}

pub struct PageLoaders {
    client: Arc<dyn StorefrontClient>,
    assembler: PageDataAssembler,
    settings: LoaderSettings,
}

impl PageLoaders {
    pub fn new(
        client: Arc<dyn StorefrontClient>,
        assembler: PageDataAssembler,
        settings: LoaderSettings,
    ) -> Self {
        Self {
            client,
            assembler,
            settings,
        }
    }

    fn known_domains(&self, shop: &Shop) -> KnownDomains {
        KnownDomains::new(
            shop.primary_domain_url.clone(),
            self.settings.public_store_domain.clone(),
        )
        .with_extra(self.settings.extra_known_domains.iter().cloned())
    }

    /// Shell shared by every page: header (critical), footer and login
    /// state (deferred). Shop data is fetched once and shared.
    pub async fn layout(
        self: &Arc<Self>,
        session: Option<CustomerSession>,
    ) -> Result<PageDataEnvelope, DomainError> {
        let client = self.client.clone();
        let shop: SharedShop = async move { client.shop().await }.boxed().shared();

        let header = {
            let this = self.clone();
            let shop = shop.clone();
            fetcher(async move {
                let (shop, menu) = futures::try_join!(
                    shop,
                    this.client.menu(&this.settings.header_menu_handle)
                )?;
                let items = MenuTreeBuilder::header(this.known_domains(&shop)).build(menu.as_ref());
                debug!("Header navigation built with {} items", items.len());
                Ok(json!({ "shop": shop, "menu": items }))
            })
        };

        let footer = {
            let this = self.clone();
            fetcher(async move {
                let (shop, menu) = futures::try_join!(
                    shop,
                    this.client.menu(&this.settings.footer_menu_handle)
                )?;
                let items = MenuTreeBuilder::footer(this.known_domains(&shop)).build(menu.as_ref());
                Ok(json!({ "menu": items }))
            })
        };

        let logged_in: Fetcher = fetcher(async move {
            match session {
                Some(session) => Ok(Value::Bool(session.is_logged_in().await?)),
                None => Ok(Value::Bool(false)),
            }
        });

        self.assembler
            .assemble(
                vec![(KEY_HEADER.to_string(), header)],
                vec![
                    (KEY_FOOTER.to_string(), footer),
                    (KEY_IS_LOGGED_IN.to_string(), logged_in),
                ],
            )
            .await
    }

    /// Homepage: featured collection above the fold, recommendations below.
    pub async fn home(&self) -> Result<PageDataEnvelope, DomainError> {
        let client = self.client.clone();
        let featured = fetcher(async move {
            Ok(client.featured_collection().await?.unwrap_or(Value::Null))
        });

        let client = self.client.clone();
        let recommended = fetcher(async move { client.recommended_products().await });

        self.assembler
            .assemble(
                vec![(KEY_FEATURED_COLLECTION.to_string(), featured)],
                vec![(KEY_RECOMMENDED_PRODUCTS.to_string(), recommended)],
            )
            .await
    }
}
