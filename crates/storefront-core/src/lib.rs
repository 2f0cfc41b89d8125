//! # Storefront Core
//! 
//! Domain entities, navigation building, page data assembly, account
//! services and the port traits adapters implement.

pub mod domain;
pub mod navigation;
pub mod services;
pub mod ports;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
