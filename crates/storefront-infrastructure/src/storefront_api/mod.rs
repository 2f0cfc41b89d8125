//! Storefront API (GraphQL) adapter

mod client;
mod queries;
mod types;

pub use client::StorefrontApiClient;
