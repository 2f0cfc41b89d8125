//! In-process session store

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::{Map, Value};
use tokio::time::Instant;
use tracing::{debug, info};

use storefront_core::error::DomainError;
use storefront_core::ports::SessionStore;

#[derive(Debug, Clone)]
struct SessionEntry {
    values: Map<String, Value>,
    touched_at: Instant,
}

impl SessionEntry {
    fn new() -> Self {
        Self {
            values: Map::new(),
            touched_at: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.touched_at.elapsed() >= ttl
    }
}

/// Session storage backed by a DashMap.
///
/// Entries expire `ttl` after their last write. Expired sessions are
/// dropped lazily on read, or in bulk by [`MemorySessionStore::cleanup_expired`].
#[derive(Clone)]
pub struct MemorySessionStore {
    sessions: Arc<DashMap<String, SessionEntry>>,
    ttl: Duration,
}

impl MemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        info!("Initializing in-memory session store (ttl: {:?})", ttl);
        Self {
            sessions: Arc::new(DashMap::new()),
            ttl,
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Returns number of sessions removed
    pub fn cleanup_expired(&self) -> usize {
        let start_len = self.sessions.len();
        let ttl = self.ttl;
        self.sessions.retain(|_, entry| !entry.is_expired(ttl));
        let count = start_len.saturating_sub(self.sessions.len());

        if count > 0 {
            info!("Cleaned up {} expired sessions", count);
        }
        count
    }

    /// Sweep expired sessions every `every` until the runtime shuts down.
    pub fn spawn_cleanup(&self, every: Duration) -> tokio::task::JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                store.cleanup_expired();
            }
        })
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, session_id: &str, key: &str) -> Result<Option<Value>, DomainError> {
        let Some(entry) = self.sessions.get(session_id) else {
            return Ok(None);
        };

        if entry.is_expired(self.ttl) {
            drop(entry);
            self.sessions.remove(session_id);
            debug!("Session {} expired, removed from store", session_id);
            return Ok(None);
        }

        Ok(entry.values.get(key).cloned())
    }

    async fn set(&self, session_id: &str, key: &str, value: Value) -> Result<(), DomainError> {
        let mut entry = self
            .sessions
            .entry(session_id.to_string())
            .or_insert_with(SessionEntry::new);
        if entry.is_expired(self.ttl) {
            *entry = SessionEntry::new();
        }
        entry.values.insert(key.to_string(), value);
        entry.touched_at = Instant::now();
        Ok(())
    }

    async fn remove(&self, session_id: &str, key: &str) -> Result<(), DomainError> {
        if let Some(mut entry) = self.sessions.get_mut(session_id) {
            entry.values.remove(key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = MemorySessionStore::new(Duration::from_secs(60));

        store.set("s1", "customerAccessToken", json!({"accessToken": "tok"})).await.unwrap();
        assert_eq!(
            store.get("s1", "customerAccessToken").await.unwrap(),
            Some(json!({"accessToken": "tok"}))
        );
        assert_eq!(store.get("s2", "customerAccessToken").await.unwrap(), None);

        store.remove("s1", "customerAccessToken").await.unwrap();
        assert_eq!(store.get("s1", "customerAccessToken").await.unwrap(), None);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_on_unknown_session_is_noop() {
        let store = MemorySessionStore::new(Duration::from_secs(60));
        store.remove("missing", "customerAccessToken").await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_expired_sessions_are_dropped() {
        let store = MemorySessionStore::new(Duration::ZERO);
        store.set("s1", "k", json!(1)).await.unwrap();

        assert_eq!(store.get("s1", "k").await.unwrap(), None);
        assert!(store.is_empty());

        store.set("s2", "k", json!(1)).await.unwrap();
        assert_eq!(store.cleanup_expired(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_background_cleanup() {
        let store = MemorySessionStore::new(Duration::from_secs(10));
        store.set("s1", "k", json!(1)).await.unwrap();
        let sweeper = store.spawn_cleanup(Duration::from_secs(30));

        tokio::time::sleep(Duration::from_secs(31)).await;
        assert!(store.is_empty());
        sweeper.abort();
    }
}
