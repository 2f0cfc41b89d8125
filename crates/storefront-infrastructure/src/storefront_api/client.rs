// ============================================================================
// Storefront Infrastructure - Storefront API Client
// File: crates/storefront-infrastructure/src/storefront_api/client.rs
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, error, warn};

use storefront_core::domain::{
    AccessTokenCreatePayload, CustomerCreatePayload, CustomerRecoverPayload, CustomerUpdate,
    CustomerUpdatePayload, Menu, Shop, TokenPurpose,
};
use storefront_core::error::DomainError;
use storefront_core::ports::StorefrontClient;
use storefront_shared::config::StorefrontSettings;
use storefront_shared::constants::STOREFRONT_TOKEN_HEADER;

use super::queries::*;
use super::types::*;

#[derive(Debug, Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
    variables: Value,
}

/// reqwest-backed Storefront API client
#[derive(Clone)]
pub struct StorefrontApiClient {
    client: Client,
    endpoint: String,
    token: String,
}

impl StorefrontApiClient {
    pub fn new(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            token: token.into(),
        })
    }

    pub fn from_settings(settings: &StorefrontSettings) -> Result<Self, DomainError> {
        Self::new(
            settings.graphql_endpoint(),
            settings.storefront_token.clone(),
            Duration::from_secs(settings.request_timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST one operation and unwrap its `data`.
    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        query: &str,
        variables: Value,
    ) -> Result<T, DomainError> {
        debug!("Storefront operation {}", operation);

        let response = self
            .client
            .post(&self.endpoint)
            .header(STOREFRONT_TOKEN_HEADER, &self.token)
            .json(&GraphqlRequest { query, variables })
            .send()
            .await
            .map_err(|e| {
                error!("Storefront {} request failed: {}", operation, e);
                DomainError::Transport(format!("{}: {}", operation, e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Storefront {} returned {}: {}", operation, status, body);
            return Err(DomainError::Transport(format!(
                "{}: HTTP {} - {}",
                operation, status, body
            )));
        }

        let body: GraphqlResponse<T> = response.json().await.map_err(|e| {
            DomainError::Transport(format!("{}: invalid response body: {}", operation, e))
        })?;

        if let Some(first) = body.errors.first() {
            warn!(
                "Storefront {} returned {} GraphQL error(s), first: {}",
                operation,
                body.errors.len(),
                first.message
            );
            return Err(DomainError::Graphql(first.message.clone()));
        }

        body.data
            .ok_or_else(|| DomainError::Graphql(format!("{}: response has no data", operation)))
    }
}

#[async_trait]
impl StorefrontClient for StorefrontApiClient {
    async fn shop(&self) -> Result<Shop, DomainError> {
        let data: ShopData = self.execute("Shop", SHOP_QUERY, json!({})).await?;
        Ok(data.shop.into())
    }

    async fn menu(&self, handle: &str) -> Result<Option<Menu>, DomainError> {
        let data: MenuData = self
            .execute("Menu", MENU_QUERY, json!({ "handle": handle }))
            .await?;
        Ok(data.menu.map(Menu::from))
    }

    async fn featured_collection(&self) -> Result<Option<Value>, DomainError> {
        let data: CollectionsData = self
            .execute("FeaturedCollection", FEATURED_COLLECTION_QUERY, json!({}))
            .await?;
        Ok(data.collections.nodes.into_iter().next())
    }

    async fn recommended_products(&self) -> Result<Value, DomainError> {
        self.execute("RecommendedProducts", RECOMMENDED_PRODUCTS_QUERY, json!({}))
            .await
    }

    async fn customer_access_token_create(
        &self,
        email: &str,
        password: &str,
        purpose: TokenPurpose,
    ) -> Result<AccessTokenCreatePayload, DomainError> {
        let (operation, mutation) = match purpose {
            TokenPurpose::Login => ("login", LOGIN_MUTATION),
            TokenPurpose::RegisterLogin => ("registerLogin", REGISTER_LOGIN_MUTATION),
        };
        let data: AccessTokenCreateData = self
            .execute(
                operation,
                mutation,
                json!({ "input": { "email": email, "password": password } }),
            )
            .await?;
        Ok(data.customer_access_token_create.unwrap_or_default())
    }

    async fn customer_create(
        &self,
        email: &str,
        password: &str,
    ) -> Result<CustomerCreatePayload, DomainError> {
        let data: CustomerCreateData = self
            .execute(
                "customerCreate",
                CUSTOMER_CREATE_MUTATION,
                json!({ "input": { "email": email, "password": password } }),
            )
            .await?;
        Ok(data.customer_create.unwrap_or_default())
    }

    async fn customer_recover(&self, email: &str) -> Result<CustomerRecoverPayload, DomainError> {
        let data: CustomerRecoverData = self
            .execute(
                "customerRecover",
                CUSTOMER_RECOVER_MUTATION,
                json!({ "email": email }),
            )
            .await?;
        Ok(data.customer_recover.unwrap_or_default())
    }

    async fn customer_update(
        &self,
        access_token: &str,
        customer: &CustomerUpdate,
    ) -> Result<CustomerUpdatePayload, DomainError> {
        let data: CustomerUpdateData = self
            .execute(
                "customerUpdate",
                CUSTOMER_UPDATE_MUTATION,
                json!({ "customerAccessToken": access_token, "customer": customer }),
            )
            .await?;
        Ok(data.customer_update.unwrap_or_default())
    }
}
