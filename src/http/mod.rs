//! # HTTP Layer
//!
//! Transport adapter between the debate orchestrator and HTTP clients:
//! request parsing, the chunked streaming endpoint, and the line-oriented
//! wire encoding of stream events.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.0.0: Initial implementation with streaming /blog endpoint

pub mod server;
pub mod wire;

pub use server::HttpServer;
