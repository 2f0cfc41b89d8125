//! Configuration management

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::error::AppError;

use crate::constants::{
    DEFAULT_API_VERSION, DEFAULT_DEFERRED_TIMEOUT_MS, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_SESSION_TTL_SECONDS, SESSION_COOKIE_NAME,
};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub storefront: StorefrontSettings,
    pub session: SessionSettings,
    pub loader: LoaderSettings,
    pub telemetry: TelemetrySettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorefrontSettings {
    /// `{shop}.myshopify.com` domain the Storefront API is served from.
    pub store_domain: String,
    /// Custom domain customers see in their browser.
    pub public_store_domain: String,
    pub api_version: String,
    pub storefront_token: String,
    pub request_timeout_secs: u64,
    pub header_menu_handle: String,
    pub footer_menu_handle: String,
    /// Overrides the endpoint derived from `store_domain`.
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub extra_known_domains: Vec<String>,
}

impl StorefrontSettings {
    pub fn graphql_endpoint(&self) -> String {
        match &self.api_url {
            Some(url) if !url.is_empty() => url.clone(),
            _ => format!(
                "https://{}/api/{}/graphql.json",
                self.store_domain.trim_end_matches('/'),
                self.api_version
            ),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    Memory,
    Redis,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    pub backend: SessionBackend,
    #[serde(default)]
    pub redis_url: Option<String>,
    pub redis_max_connections: usize,
    pub ttl_seconds: u64,
    pub cookie_name: String,
    pub cookie_secure: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoaderSettings {
    /// Upper bound for a deferred fetch. `0` leaves it to the request lifecycle.
    pub deferred_timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelemetrySettings {
    pub json: bool,
    #[serde(default)]
    pub log_dir: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        Self::builder(&env)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?
            .try_deserialize()
            .map_err(AppError::from)
    }

    /// Builder pre-populated with every default, so a partial config file is enough.
    pub fn builder(
        env: &str,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.env", env)?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "storefront-server")?
            .set_default("storefront.store_domain", "")?
            .set_default("storefront.public_store_domain", "")?
            .set_default("storefront.api_version", DEFAULT_API_VERSION)?
            .set_default("storefront.storefront_token", "")?
            .set_default("storefront.request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS)?
            .set_default("storefront.header_menu_handle", "main-menu")?
            .set_default("storefront.footer_menu_handle", "footer")?
            .set_default("session.backend", "memory")?
            .set_default("session.redis_max_connections", 16)?
            .set_default("session.ttl_seconds", DEFAULT_SESSION_TTL_SECONDS)?
            .set_default("session.cookie_name", SESSION_COOKIE_NAME)?
            .set_default("session.cookie_secure", false)?
            .set_default("loader.deferred_timeout_ms", DEFAULT_DEFERRED_TIMEOUT_MS)?
            .set_default("telemetry.json", true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config: AppConfig = AppConfig::builder("test")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.app.env, "test");
        assert_eq!(config.app.port, 8080);
        assert_eq!(config.session.backend, SessionBackend::Memory);
        assert_eq!(config.loader.deferred_timeout_ms, DEFAULT_DEFERRED_TIMEOUT_MS);
        assert!(config.storefront.extra_known_domains.is_empty());
    }

    #[test]
    fn test_file_values_override_defaults() {
        let toml = r#"
            [storefront]
            store_domain = "mystore.myshopify.com"
            public_store_domain = "mystore.com"
            storefront_token = "abc"

            [session]
            backend = "redis"
            redis_url = "redis://127.0.0.1/"
        "#;
        let config: AppConfig = AppConfig::builder("test")
            .unwrap()
            .add_source(config::File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.session.backend, SessionBackend::Redis);
        assert_eq!(
            config.storefront.graphql_endpoint(),
            format!("https://mystore.myshopify.com/api/{}/graphql.json", DEFAULT_API_VERSION)
        );
    }

    #[test]
    fn test_api_url_override() {
        let settings = StorefrontSettings {
            store_domain: "mystore.myshopify.com".into(),
            public_store_domain: "mystore.com".into(),
            api_version: "2024-10".into(),
            storefront_token: String::new(),
            request_timeout_secs: 5,
            header_menu_handle: "main-menu".into(),
            footer_menu_handle: "footer".into(),
            api_url: Some("http://127.0.0.1:9999/graphql".into()),
            extra_known_domains: vec![],
        };
        assert_eq!(settings.graphql_endpoint(), "http://127.0.0.1:9999/graphql");
    }
}
