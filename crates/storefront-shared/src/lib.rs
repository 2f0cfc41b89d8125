//! # Storefront Shared
//! 
//! Shared configuration, constants, and telemetry for the storefront service.

pub mod constants;
pub mod utils;
pub mod telemetry;
pub mod config;
pub mod error;

pub use config::AppConfig;
pub use error::AppError;
