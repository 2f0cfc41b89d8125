use std::sync::Arc;

use storefront_core::ports::{SessionStore, StorefrontClient};
use storefront_core::services::{
    AccountService, AssemblerOptions, LoaderSettings, PageDataAssembler, PageLoaders,
};
use storefront_shared::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub accounts: Arc<AccountService<dyn StorefrontClient>>,
    pub loaders: Arc<PageLoaders>,
    pub sessions: Arc<dyn SessionStore>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        client: Arc<dyn StorefrontClient>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        let assembler =
            PageDataAssembler::new(AssemblerOptions::from_millis(config.loader.deferred_timeout_ms));
        let loader_settings = LoaderSettings {
            public_store_domain: config.storefront.public_store_domain.clone(),
            extra_known_domains: config.storefront.extra_known_domains.clone(),
            header_menu_handle: config.storefront.header_menu_handle.clone(),
            footer_menu_handle: config.storefront.footer_menu_handle.clone(),
        };

        Self {
            accounts: Arc::new(AccountService::new(client.clone())),
            loaders: Arc::new(PageLoaders::new(client, assembler, loader_settings)),
            sessions,
            config: Arc::new(config),
        }
    }
}
