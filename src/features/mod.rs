//! # Features Layer
//!
//! Feature modules for the blog generation service.

pub mod agents;
pub mod debate;

pub use agents::{Agent, AgentDefinition, AgentFactory, ChatAgent, ChatModel, CompletionModel};
pub use debate::{DebateOrchestrator, DebatePolicy, StreamEvent, TurnRouter};
