//! # Storefront Infrastructure
//!
//! Storefront API client and session store implementations (adapters).

pub mod session;
pub mod storefront_api;

pub use session::{build_session_store, MemorySessionStore, RedisSessionStore};
pub use storefront_api::StorefrontApiClient;
