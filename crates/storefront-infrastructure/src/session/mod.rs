//! Session store adapters

mod memory;
mod redis;

use std::sync::Arc;
use std::time::Duration;

use storefront_core::error::DomainError;
use storefront_core::ports::SessionStore;
use storefront_shared::config::{SessionBackend, SessionSettings};
use tracing::info;

const CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

pub use memory::MemorySessionStore;
pub use redis::{create_pool, RedisSessionStore};

/// Build the store selected by `session.backend`.
pub fn build_session_store(
    settings: &SessionSettings,
) -> Result<Arc<dyn SessionStore>, DomainError> {
    match settings.backend {
        SessionBackend::Memory => {
            let store = MemorySessionStore::new(Duration::from_secs(settings.ttl_seconds));
            store.spawn_cleanup(CLEANUP_INTERVAL);
            Ok(Arc::new(store))
        }
        SessionBackend::Redis => {
            let url = settings.redis_url.as_deref().ok_or_else(|| {
                DomainError::Session("session.redis_url is required for the redis backend".into())
            })?;
            let pool = create_pool(url, settings.redis_max_connections)?;
            info!("Using Redis session store");
            Ok(Arc::new(RedisSessionStore::new(pool, settings.ttl_seconds)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(backend: SessionBackend, redis_url: Option<&str>) -> SessionSettings {
        SessionSettings {
            backend,
            redis_url: redis_url.map(str::to_string),
            redis_max_connections: 4,
            ttl_seconds: 60,
            cookie_name: "storefront_session".into(),
            cookie_secure: false,
        }
    }

    #[tokio::test]
    async fn test_memory_backend() {
        assert!(build_session_store(&settings(SessionBackend::Memory, None)).is_ok());
    }

    #[tokio::test]
    async fn test_redis_backend_requires_url() {
        let err = build_session_store(&settings(SessionBackend::Redis, None)).err().unwrap();
        assert!(matches!(err, DomainError::Session(_)));
    }
}
