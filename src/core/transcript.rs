//! # Debate Transcript
//!
//! Shared conversation types for a single debate run: who spoke, what they
//! said, and in which order. The transcript is append-only: turns are never
//! mutated or reordered once recorded, and every model call receives the
//! same ordered view.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Added `last_content_by` for final artifact selection
//! - 1.0.0: Initial Actor/Turn/Transcript types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who authored a turn in the debate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Actor {
    /// The end user who supplied the topic
    User,
    /// Drafts and revises the blog post
    Writer,
    /// Evaluates the current draft and scores it from 1 to 10
    Critic,
}

impl Actor {
    /// Resolve an agent definition name ("WRITER"/"CRITIC") to an actor.
    pub fn from_agent_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "WRITER" => Some(Actor::Writer),
            "CRITIC" => Some(Actor::Critic),
            "USER" => Some(Actor::User),
            _ => None,
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Actor::User => "USER",
            Actor::Writer => "WRITER",
            Actor::Critic => "CRITIC",
        };
        write!(f, "{name}")
    }
}

/// A single utterance in the debate. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub role: Actor,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    pub fn new(role: Actor, content: impl Into<String>) -> Self {
        Turn {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Convenience constructor for the initial user message
    pub fn user(content: impl Into<String>) -> Self {
        Turn::new(Actor::User, content)
    }
}

/// Ordered, append-only record of all turns in one debate run.
///
/// Owned exclusively by a single orchestrator invocation; concurrent runs
/// each get their own transcript and never observe each other's entries.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Transcript { turns: Vec::new() }
    }

    /// Record a new turn. The only way the transcript grows.
    pub fn append(&mut self, role: Actor, content: impl Into<String>) {
        self.turns.push(Turn::new(role, content));
    }

    /// Record an already-constructed turn (used when seeding the run).
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn turns(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    /// Most recent turn, if any
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Content of the most recent turn authored by `actor`
    pub fn last_content_by(&self, actor: Actor) -> Option<&str> {
        self.turns
            .iter()
            .rev()
            .find(|t| t.role == actor)
            .map(|t| t.content.as_str())
    }

    /// Whether any turn was authored by `actor`
    pub fn has_turn_by(&self, actor: Actor) -> bool {
        self.turns.iter().any(|t| t.role == actor)
    }

    /// Flat `NAME: content` rendering used as context for the routing model
    pub fn render(&self) -> String {
        let mut out = String::new();
        for turn in &self.turns {
            out.push_str(&format!("{}: {}\n", turn.role, turn.content));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_display() {
        assert_eq!(Actor::User.to_string(), "USER");
        assert_eq!(Actor::Writer.to_string(), "WRITER");
        assert_eq!(Actor::Critic.to_string(), "CRITIC");
    }

    #[test]
    fn test_actor_from_agent_name() {
        assert_eq!(Actor::from_agent_name("WRITER"), Some(Actor::Writer));
        assert_eq!(Actor::from_agent_name("critic"), Some(Actor::Critic));
        assert_eq!(Actor::from_agent_name(" Writer "), Some(Actor::Writer));
        assert_eq!(Actor::from_agent_name("JUDGE"), None);
    }

    #[test]
    fn test_transcript_append_only_growth() {
        let mut transcript = Transcript::new();
        assert!(transcript.is_empty());

        transcript.append(Actor::User, "Write a blog post about cookies.");
        transcript.append(Actor::Writer, "Draft A");
        transcript.append(Actor::Critic, "Score: 6/10, needs work");

        assert_eq!(transcript.len(), 3);
        let roles: Vec<Actor> = transcript.turns().map(|t| t.role).collect();
        assert_eq!(roles, vec![Actor::User, Actor::Writer, Actor::Critic]);
    }

    #[test]
    fn test_last_content_by_picks_most_recent() {
        let mut transcript = Transcript::new();
        transcript.append(Actor::User, "topic");
        transcript.append(Actor::Writer, "Draft A");
        transcript.append(Actor::Critic, "Score: 4/10");
        transcript.append(Actor::Writer, "Draft B");

        assert_eq!(transcript.last_content_by(Actor::Writer), Some("Draft B"));
        assert_eq!(transcript.last_content_by(Actor::Critic), Some("Score: 4/10"));
        assert!(transcript.last_content_by(Actor::User).is_some());
    }

    #[test]
    fn test_last_content_by_absent_actor() {
        let mut transcript = Transcript::new();
        transcript.append(Actor::User, "topic");
        assert_eq!(transcript.last_content_by(Actor::Writer), None);
        assert!(!transcript.has_turn_by(Actor::Writer));
    }

    #[test]
    fn test_render_includes_roles_in_order() {
        let mut transcript = Transcript::new();
        transcript.append(Actor::User, "Write about Mondays.");
        transcript.append(Actor::Writer, "Mondays are underrated.");

        let rendered = transcript.render();
        let user_pos = rendered.find("USER: Write about Mondays.").unwrap();
        let writer_pos = rendered.find("WRITER: Mondays are underrated.").unwrap();
        assert!(user_pos < writer_pos);
    }
}
