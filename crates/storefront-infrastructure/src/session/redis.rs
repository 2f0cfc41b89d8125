//! Redis-backed session store

use async_trait::async_trait;
use deadpool_redis::redis::AsyncCommands;
use deadpool_redis::{Config, Connection, Pool, PoolConfig, Runtime};
use serde_json::Value;
use tracing::{error, info, warn};

use storefront_core::error::DomainError;
use storefront_core::ports::SessionStore;

const KEY_PREFIX: &str = "storefront:session:";

pub fn create_pool(url: &str, max_connections: usize) -> Result<Pool, DomainError> {
    let mut cfg = Config::from_url(url);
    cfg.pool = Some(PoolConfig::new(max_connections));
    let pool = cfg
        .create_pool(Some(Runtime::Tokio1))
        .map_err(|e| DomainError::Session(format!("Failed to create Redis pool: {}", e)))?;
    info!("Redis session pool created (max {} connections)", max_connections);
    Ok(pool)
}

/// One Redis hash per session, refreshed to `ttl_seconds` on every write.
#[derive(Clone)]
pub struct RedisSessionStore {
    pool: Pool,
    ttl_seconds: i64,
}

impl RedisSessionStore {
    pub fn new(pool: Pool, ttl_seconds: u64) -> Self {
        Self {
            pool,
            ttl_seconds: i64::try_from(ttl_seconds).unwrap_or(i64::MAX),
        }
    }

    fn key(session_id: &str) -> String {
        format!("{}{}", KEY_PREFIX, session_id)
    }

    async fn connection(&self) -> Result<Connection, DomainError> {
        self.pool.get().await.map_err(|e| {
            error!("Redis pool exhausted or unreachable: {}", e);
            DomainError::Session(e.to_string())
        })
    }
}

fn redis_err(e: deadpool_redis::redis::RedisError) -> DomainError {
    DomainError::Session(e.to_string())
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn get(&self, session_id: &str, key: &str) -> Result<Option<Value>, DomainError> {
        let mut conn = self.connection().await?;
        let raw: Option<String> = conn
            .hget(Self::key(session_id), key)
            .await
            .map_err(redis_err)?;

        Ok(raw.and_then(|raw| match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Unreadable session value {} in {}: {}", key, session_id, e);
                None
            }
        }))
    }

    async fn set(&self, session_id: &str, key: &str, value: Value) -> Result<(), DomainError> {
        let mut conn = self.connection().await?;
        let redis_key = Self::key(session_id);
        let () = conn
            .hset(&redis_key, key, value.to_string())
            .await
            .map_err(redis_err)?;
        let () = conn
            .expire(&redis_key, self.ttl_seconds)
            .await
            .map_err(redis_err)?;
        Ok(())
    }

    async fn remove(&self, session_id: &str, key: &str) -> Result<(), DomainError> {
        let mut conn = self.connection().await?;
        let () = conn
            .hdel(Self::key(session_id), key)
            .await
            .map_err(redis_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_key_is_namespaced() {
        assert_eq!(RedisSessionStore::key("abc"), "storefront:session:abc");
    }

    #[tokio::test]
    async fn test_create_pool_is_lazy() {
        // Pool creation does not connect, so an unreachable host is fine here.
        let pool = create_pool("redis://127.0.0.1:1", 4).unwrap();
        assert_eq!(pool.status().max_size, 4);
    }
}
