// ============================================================================
// Storefront Core - URL Resolver
// File: crates/storefront-core/src/navigation/url_resolver.rs
// Description: Classifies menu links as internal or external
// ============================================================================

use serde::Serialize;
use storefront_shared::constants::PLATFORM_DOMAIN_SUFFIX;
use url::Url;

use super::NavigationError;

/// Domains that mark a link as belonging to this store.
#[derive(Debug, Clone, Default)]
pub struct KnownDomains {
    primary_domain_url: String,
    public_store_domain: String,
    extra: Vec<String>,
}

impl KnownDomains {
    pub fn new(primary_domain_url: impl Into<String>, public_store_domain: impl Into<String>) -> Self {
        Self {
            primary_domain_url: primary_domain_url.into(),
            public_store_domain: public_store_domain.into(),
            extra: Vec::new(),
        }
    }

    pub fn with_extra<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra.extend(domains.into_iter().map(Into::into));
        self
    }

    /// Case-sensitive substring match against every non-empty known domain.
    /// An empty needle would match any url, so it is skipped.
    pub fn is_internal(&self, url: &str) -> bool {
        std::iter::once(PLATFORM_DOMAIN_SUFFIX)
            .chain(std::iter::once(self.public_store_domain.as_str()))
            .chain(std::iter::once(self.primary_domain_url.as_str()))
            .chain(self.extra.iter().map(String::as_str))
            .filter(|domain| !domain.is_empty())
            .any(|domain| url.contains(domain))
    }
}

/// Normalized link target for one menu entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLink {
    href: String,
    is_external: bool,
}

impl ResolvedLink {
    pub fn new(href: impl Into<String>) -> Self {
        let href = href.into();
        let is_external = !href.starts_with('/');
        Self { href, is_external }
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn is_external(&self) -> bool {
        self.is_external
    }

    pub fn into_href(self) -> String {
        self.href
    }
}

/// Internal links are reduced to their path; anything else passes through unchanged.
pub fn resolve(url: &str, domains: &KnownDomains) -> Result<ResolvedLink, NavigationError> {
    if url.is_empty() {
        return Err(NavigationError::EmptyUrl);
    }

    if !domains.is_internal(url) {
        return Ok(ResolvedLink::new(url));
    }

    let parsed = Url::parse(url).map_err(|e| NavigationError::MalformedUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    Ok(ResolvedLink::new(parsed.path()))
}
