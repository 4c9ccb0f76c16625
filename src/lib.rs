// Core layer - shared types and configuration
pub mod core;

// Features layer - agents and the debate loop
pub mod features;

// HTTP layer - streaming API boundary
pub mod http;

// Re-export core config for convenience
pub use core::Config;

// Re-export feature items
pub use features::{
    // Agents
    Agent, AgentDefinition, AgentFactory, ChatAgent, ChatModel, CompletionModel,
    // Debate
    DebateOrchestrator, DebatePolicy, StreamEvent, TurnRouter,
};

// Re-export HTTP server
pub use http::HttpServer;
