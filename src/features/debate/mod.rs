//! # Feature: Debate
//!
//! Turn-based writer/critic debate that produces a blog post. A routing
//! model proposes who acts next, a deterministic score backstop and a round
//! cap bound the loop, and progress is streamed to the caller as events.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.2.0: Per-round timeouts; round cap made configurable
//! - 1.1.0: Deterministic score backstop independent of router compliance
//! - 1.0.0: Initial round loop with streaming status events

pub mod events;
pub mod orchestrator;
pub mod router;
pub mod score;

pub use events::StreamEvent;
pub use orchestrator::{DebateOrchestrator, DebatePolicy};
pub use router::{RoutedActor, RoutingDirective, TurnRouter};
