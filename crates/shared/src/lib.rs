//! Shared configuration and types for the balance service.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Pagination request type for history listings
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
