//! Port traits implemented by infrastructure adapters

pub mod storefront_client;
pub mod session_store;

pub use storefront_client::StorefrontClient;
pub use session_store::SessionStore;
