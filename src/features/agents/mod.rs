//! # Feature: Debate Agents
//!
//! Declarative agent construction and the model-call seams the debate
//! orchestrator depends on. Agents are described by YAML definition files
//! (name, description, instructions, temperature, included_plugins) and
//! built by [`AgentFactory`]; the orchestrator only ever sees the [`Agent`]
//! and [`CompletionModel`] traits, which keeps every model round trip
//! mockable in tests.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.0.0: Initial implementation with YAML definitions and OpenAI backend

pub mod chat;
pub mod definition;

pub use chat::{ChatAgent, ChatModel};
pub use definition::{AgentDefinition, AgentFactory};

use crate::core::transcript::{Actor, Transcript};
use anyhow::Result;
use async_trait::async_trait;

/// A debate participant: given the conversation so far, produce its next
/// contribution. Implementations receive a read-only transcript snapshot
/// and must not retain state between calls.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Definition name, e.g. "WRITER"
    fn name(&self) -> &str;

    /// Which transcript role this agent's turns are recorded under
    fn role(&self) -> Actor;

    /// Generate the agent's reply to the conversation so far
    async fn generate_reply(&self, transcript: &Transcript) -> Result<String>;
}

/// Opaque text-in/text-out completion capability used for turn routing
#[async_trait]
pub trait CompletionModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}
