//! Storefront GraphQL API port

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{
    AccessTokenCreatePayload, CustomerCreatePayload, CustomerRecoverPayload, CustomerUpdate,
    CustomerUpdatePayload, Menu, Shop, TokenPurpose,
};
use crate::error::DomainError;

/// Named operations issued against the commerce platform. Implementations
/// report transport failures as `DomainError::Transport` and top-level
/// GraphQL errors as `DomainError::Graphql`; `customerUserErrors` are
/// returned untouched inside the payloads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorefrontClient: Send + Sync {
    async fn shop(&self) -> Result<Shop, DomainError>;

    async fn menu(&self, handle: &str) -> Result<Option<Menu>, DomainError>;

    /// Most recently updated collection, `None` when the store has none.
    async fn featured_collection(&self) -> Result<Option<Value>, DomainError>;

    async fn recommended_products(&self) -> Result<Value, DomainError>;

    async fn customer_access_token_create(
        &self,
        email: &str,
        password: &str,
        purpose: TokenPurpose,
    ) -> Result<AccessTokenCreatePayload, DomainError>;

    async fn customer_create(
        &self,
        email: &str,
        password: &str,
    ) -> Result<CustomerCreatePayload, DomainError>;

    async fn customer_recover(&self, email: &str) -> Result<CustomerRecoverPayload, DomainError>;

    async fn customer_update(
        &self,
        access_token: &str,
        customer: &CustomerUpdate,
    ) -> Result<CustomerUpdatePayload, DomainError>;
}
