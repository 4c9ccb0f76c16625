//! # Core Module
//!
//! Core domain types and configuration for the blog generation service.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Added transcript module with debate conversation types
//! - 1.0.0: Initial creation with config module

pub mod config;
pub mod transcript;

// Re-export commonly used items
pub use config::Config;
pub use transcript::{Actor, Transcript, Turn};
