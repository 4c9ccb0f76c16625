//! Turn routing for the debate loop.
//!
//! A routing model reads the transcript and names which agent acts next.
//! Its reply is free text, so the answer is parsed into a strict tagged
//! variant; anything unrecognizable comes back as `Unknown` and the
//! orchestrator applies its fail-safe default. Routing is advisory only:
//! termination never depends on the model following instructions, because
//! the orchestrator's score backstop is checked in code.

use crate::core::transcript::Transcript;
use crate::features::agents::CompletionModel;
use anyhow::Result;
use log::debug;
use std::sync::Arc;

/// Which agent the router named, or `Unknown` when the reply was
/// unparseable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutedActor {
    Writer,
    Critic,
    Unknown,
}

/// The router's decision for one round
#[derive(Debug, Clone)]
pub struct RoutingDirective {
    pub actor: RoutedActor,
    /// The routing model's reply, verbatim (used in status summaries)
    pub raw_text: String,
}

/// Asks the routing model who acts next and parses the answer
#[derive(Clone)]
pub struct TurnRouter {
    model: Arc<dyn CompletionModel>,
}

impl TurnRouter {
    pub fn new(model: Arc<dyn CompletionModel>) -> Self {
        TurnRouter { model }
    }

    /// Decide which agent acts next, given the transcript so far
    pub async fn next(&self, transcript: &Transcript) -> Result<RoutingDirective> {
        let prompt = build_routing_prompt(transcript);
        let raw_text = self.model.complete(&prompt).await?;
        let actor = parse_actor(&raw_text);
        debug!("Routing reply '{raw_text}' parsed as {actor:?}");
        Ok(RoutingDirective { actor, raw_text })
    }
}

/// Fixed routing instruction wrapped around the rendered transcript
fn build_routing_prompt(transcript: &Transcript) -> String {
    format!(
        "Provided the following chat history, what is the next action in the agentic chat?\n\
         \n\
         Provide a three word summary.\n\
         Always indicate WHO takes the action, for example: WRITER: Writes revised draft\n\
         OBS! CRITIC cannot take action, only evaluate the text and provide a score.\n\
         \n\
         IF the last entry is from CRITIC and the score is above 8 - you MUST respond with \"CRITIC: Approves the text.\"\n\
         \n\
         AGENTS:\n\
         - WRITER: Writes and revises the text\n\
         - CRITIC: Evaluates the text and provides scoring from 1 to 10\n\
         \n\
         AGENT_CHAT: {}\n",
        transcript.render()
    )
}

/// Parse the routing reply: the token before the first `:` (or the first
/// word when there is no colon), matched case-insensitively against the
/// known agent names.
pub fn parse_actor(raw: &str) -> RoutedActor {
    let head = raw.trim().split(':').next().unwrap_or_default();
    let token = head
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .trim_matches(|c: char| !c.is_ascii_alphabetic());

    match token.to_ascii_lowercase().as_str() {
        "writer" => RoutedActor::Writer,
        "critic" => RoutedActor::Critic,
        _ => RoutedActor::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transcript::Actor;
    use async_trait::async_trait;

    struct FixedModel(String);

    #[async_trait]
    impl CompletionModel for FixedModel {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_parse_writer_directive() {
        assert_eq!(parse_actor("WRITER: Writes first draft"), RoutedActor::Writer);
        assert_eq!(parse_actor("writer: revises the text"), RoutedActor::Writer);
        assert_eq!(parse_actor("  Writer rewrites intro"), RoutedActor::Writer);
    }

    #[test]
    fn test_parse_critic_directive() {
        assert_eq!(parse_actor("CRITIC: Approves the text."), RoutedActor::Critic);
        assert_eq!(parse_actor("**CRITIC**: Scores the draft"), RoutedActor::Critic);
    }

    #[test]
    fn test_parse_garbage_is_unknown() {
        assert_eq!(parse_actor("The next step is unclear"), RoutedActor::Unknown);
        assert_eq!(parse_actor(""), RoutedActor::Unknown);
        assert_eq!(parse_actor("EDITOR: polishes the text"), RoutedActor::Unknown);
        assert_eq!(parse_actor("42"), RoutedActor::Unknown);
    }

    #[test]
    fn test_routing_prompt_includes_history() {
        let mut transcript = Transcript::new();
        transcript.append(Actor::User, "Write a blog post about cookies.");
        transcript.append(Actor::Writer, "Cookies are great.");

        let prompt = build_routing_prompt(&transcript);
        assert!(prompt.contains("AGENT_CHAT:"));
        assert!(prompt.contains("USER: Write a blog post about cookies."));
        assert!(prompt.contains("WRITER: Cookies are great."));
        assert!(prompt.contains("CRITIC: Approves the text."));
    }

    #[tokio::test]
    async fn test_next_parses_model_reply() {
        let router = TurnRouter::new(Arc::new(FixedModel(
            "CRITIC: Evaluates the draft".to_string(),
        )));
        let transcript = Transcript::new();

        let directive = router.next(&transcript).await.unwrap();
        assert_eq!(directive.actor, RoutedActor::Critic);
        assert_eq!(directive.raw_text, "CRITIC: Evaluates the draft");
    }
}
