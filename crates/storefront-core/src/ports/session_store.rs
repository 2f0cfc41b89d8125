//! Session storage port

use async_trait::async_trait;
use serde_json::Value;

use crate::error::DomainError;

/// Opaque key-value storage scoped by session id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, session_id: &str, key: &str) -> Result<Option<Value>, DomainError>;

    async fn set(&self, session_id: &str, key: &str, value: Value) -> Result<(), DomainError>;

    async fn remove(&self, session_id: &str, key: &str) -> Result<(), DomainError>;
}
