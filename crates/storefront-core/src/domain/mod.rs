//! # Storefront Core - Domain Module
//! 
//! Domain entities for the storefront.

pub mod menu;
pub mod customer;

// Re-export all entities
pub use menu::{Menu, MenuItem};
pub use customer::{
    AccessTokenCreatePayload, Customer, CustomerAccessToken, CustomerCreatePayload,
    CustomerRecoverPayload, CustomerUpdate, CustomerUpdatePayload, CustomerUserError, Shop,
    TokenPurpose,
};
