//! Shared types, errors, and configuration for Mandap.
//!
//! This crate provides common types used across all other crates:
//! - Money as minor-unit integer amounts with a currency tag
//! - Typed IDs for type-safe entity references
//! - Pagination types for list endpoints
//! - Application-wide error types
//! - Configuration management
//! - JWT claims and validation (the trusted auth boundary)

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

pub use auth::Claims;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtError, JwtService};
