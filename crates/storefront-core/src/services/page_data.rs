// ============================================================================
// Storefront Core - Page Data Assembler
// File: crates/storefront-core/src/services/page_data.rs
// ============================================================================
//! Critical/deferred page data loading.
//!
//! Critical fetchers run concurrently and all of them must succeed before the
//! page can respond. Deferred fetchers are spawned before the critical ones
//! are awaited; each settles into exactly one terminal state, a value or
//! [`DeferredValue::Unavailable`], and never fails the page.

use std::future::Future;
use std::time::Duration;

use futures::future::{try_join_all, BoxFuture};
use futures::stream::{BoxStream, FuturesUnordered, StreamExt};
use futures::FutureExt;
use serde_json::{Map, Value};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::error::DomainError;

/// One unit of page data
pub type Fetcher = BoxFuture<'static, Result<Value, DomainError>>;

pub fn fetcher<F>(future: F) -> Fetcher
where
    F: Future<Output = Result<Value, DomainError>> + Send + 'static,
{
    future.boxed()
}

/// Terminal outcome of a deferred fetch
#[derive(Debug, Clone, PartialEq)]
pub enum DeferredValue {
    Ready(Value),
    /// Failed, timed out or was cancelled; not retried within the request.
    Unavailable,
}

impl DeferredValue {
    pub fn into_option(self) -> Option<Value> {
        match self {
            DeferredValue::Ready(value) => Some(value),
            DeferredValue::Unavailable => None,
        }
    }
}

/// Observable state of a deferred fetch
#[derive(Debug, Clone, PartialEq)]
pub enum DeferredState {
    Pending,
    Ready(Value),
    Unavailable,
}

impl DeferredState {
    pub fn is_pending(&self) -> bool {
        matches!(self, DeferredState::Pending)
    }
}

/// Handle to a spawned deferred fetch. Dropping it aborts the fetch.
pub struct DeferredHandle {
    key: String,
    state: watch::Receiver<DeferredState>,
    task: JoinHandle<()>,
}

impl DeferredHandle {
    fn spawn(key: String, fetch: Fetcher, timeout: Option<Duration>) -> Self {
        let (tx, rx) = watch::channel(DeferredState::Pending);
        let task_key = key.clone();

        let task = tokio::spawn(async move {
            let outcome = match timeout {
                Some(limit) => match tokio::time::timeout(limit, fetch).await {
                    Ok(result) => result,
                    Err(_) => {
                        warn!("Deferred data '{}' timed out after {:?}", task_key, limit);
                        let _ = tx.send(DeferredState::Unavailable);
                        return;
                    }
                },
                None => fetch.await,
            };

            let state = match outcome {
                Ok(value) => {
                    debug!("Deferred data '{}' resolved", task_key);
                    DeferredState::Ready(value)
                }
                Err(e) => {
                    warn!("Deferred data '{}' unavailable: {}", task_key, e);
                    DeferredState::Unavailable
                }
            };
            let _ = tx.send(state);
        });

        Self {
            key,
            state: rx,
            task,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current state without waiting.
    pub fn peek(&self) -> DeferredState {
        self.state.borrow().clone()
    }

    /// Waits for the terminal state.
    pub async fn resolved(&mut self) -> DeferredValue {
        match self.state.wait_for(|s| !s.is_pending()).await {
            Ok(state) => match &*state {
                DeferredState::Ready(value) => DeferredValue::Ready(value.clone()),
                _ => DeferredValue::Unavailable,
            },
            Err(_) => {
                // sender dropped before settling: the task panicked or was aborted
                warn!("Deferred data '{}' ended without a value", self.key);
                DeferredValue::Unavailable
            }
        }
    }
}

impl Drop for DeferredHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl std::fmt::Debug for DeferredHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeferredHandle")
            .field("key", &self.key)
            .field("state", &*self.state.borrow())
            .finish()
    }
}

/// Result of [`PageDataAssembler::assemble`]
#[derive(Debug)]
pub struct PageDataEnvelope {
    pub critical: Map<String, Value>,
    deferred: Vec<DeferredHandle>,
}

impl PageDataEnvelope {
    pub fn deferred_keys(&self) -> Vec<&str> {
        self.deferred.iter().map(DeferredHandle::key).collect()
    }

    pub fn deferred(&self, key: &str) -> Option<&DeferredHandle> {
        self.deferred.iter().find(|h| h.key == key)
    }

    pub fn deferred_mut(&mut self, key: &str) -> Option<&mut DeferredHandle> {
        self.deferred.iter_mut().find(|h| h.key == key)
    }

    /// Waits for one deferred key. `None` when the key was never requested.
    pub async fn resolve_deferred(&mut self, key: &str) -> Option<DeferredValue> {
        match self.deferred_mut(key) {
            Some(handle) => Some(handle.resolved().await),
            None => None,
        }
    }

    /// Splits off the critical data and yields deferred values in completion
    /// order. Dropping the stream aborts whatever is still in flight.
    pub fn into_parts(self) -> (Map<String, Value>, Vec<String>, BoxStream<'static, (String, DeferredValue)>) {
        let keys = self.deferred.iter().map(|h| h.key.clone()).collect();
        let pending: FuturesUnordered<_> = self
            .deferred
            .into_iter()
            .map(|mut handle| async move {
                let value = handle.resolved().await;
                (handle.key.clone(), value)
            })
            .collect();
        (self.critical, keys, pending.boxed())
    }
}

#[derive(Debug, Clone, Default)]
pub struct AssemblerOptions {
    /// Upper bound for each deferred fetch; `None` leaves it to the request lifecycle.
    pub deferred_timeout: Option<Duration>,
}

impl AssemblerOptions {
    pub fn from_millis(deferred_timeout_ms: u64) -> Self {
        Self {
            deferred_timeout: (deferred_timeout_ms > 0)
                .then(|| Duration::from_millis(deferred_timeout_ms)),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PageDataAssembler {
    options: AssemblerOptions,
}

impl PageDataAssembler {
    pub fn new(options: AssemblerOptions) -> Self {
        Self { options }
    }

    pub async fn assemble(
        &self,
        critical: Vec<(String, Fetcher)>,
        deferred: Vec<(String, Fetcher)>,
    ) -> Result<PageDataEnvelope, DomainError> {
        // Start deferred work first so it never waits on the critical path.
        let deferred: Vec<DeferredHandle> = deferred
            .into_iter()
            .map(|(key, fetch)| DeferredHandle::spawn(key, fetch, self.options.deferred_timeout))
            .collect();

        let resolved = try_join_all(
            critical
                .into_iter()
                .map(|(key, fetch)| async move { fetch.await.map(|value| (key, value)) }),
        )
        .await
        .map_err(|e| {
            error!("Critical page data failed: {}", e);
            e
        })?;

        Ok(PageDataEnvelope {
            critical: resolved.into_iter().collect(),
            deferred,
        })
    }
}
