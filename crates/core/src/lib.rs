//! Core types and configuration for the histdata system.
//!
//! This crate provides shared types used across all other crates:
//! - Daily and monthly price records
//! - The persisted monthly dataset and its JSON store
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod store;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
