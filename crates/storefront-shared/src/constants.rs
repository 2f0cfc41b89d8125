//! Application-wide constants

/// Domain suffix shared by every store hosted on the commerce platform.
pub const PLATFORM_DOMAIN_SUFFIX: &str = "myshopify.com";
pub const DEFAULT_API_VERSION: &str = "2024-10";
pub const STOREFRONT_TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";
pub const SESSION_COOKIE_NAME: &str = "storefront_session";
pub const SESSION_KEY_ACCESS_TOKEN: &str = "customerAccessToken";
pub const DEFAULT_SESSION_TTL_SECONDS: u64 = 60 * 60 * 24 * 14;
pub const DEFAULT_DEFERRED_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
