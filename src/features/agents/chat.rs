//! OpenAI-backed implementations of the [`Agent`] and [`CompletionModel`]
//! seams. One chat completion per call; the conversation context is rebuilt
//! from the transcript every time, so the backing objects stay stateless
//! and safe to share across concurrent debates.

use crate::core::transcript::{Actor, Transcript};
use crate::features::agents::definition::AgentDefinition;
use crate::features::agents::{Agent, CompletionModel};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{debug, info};
use openai::chat::{ChatCompletion, ChatCompletionMessage, ChatCompletionMessageRole};
use uuid::Uuid;

fn message(role: ChatCompletionMessageRole, content: String, name: Option<String>) -> ChatCompletionMessage {
    ChatCompletionMessage {
        role,
        content: Some(content),
        name,
        function_call: None,
        tool_call_id: None,
        tool_calls: None,
    }
}

/// A debate participant backed by an OpenAI chat model
pub struct ChatAgent {
    definition: AgentDefinition,
    role: Actor,
    model: String,
}

impl ChatAgent {
    pub fn new(definition: AgentDefinition, role: Actor, model: String) -> Self {
        ChatAgent {
            definition,
            role,
            model,
        }
    }

    /// Map the transcript onto the chat completion message list.
    ///
    /// The agent's instructions become the system message. User turns stay
    /// user messages; both agents' turns become named assistant messages so
    /// each participant can tell its own drafts from the other's critiques.
    fn build_messages(&self, transcript: &Transcript) -> Vec<ChatCompletionMessage> {
        let mut messages = vec![message(
            ChatCompletionMessageRole::System,
            self.definition.instructions.clone(),
            None,
        )];

        for turn in transcript.turns() {
            let msg = match turn.role {
                Actor::User => {
                    message(ChatCompletionMessageRole::User, turn.content.clone(), None)
                }
                Actor::Writer | Actor::Critic => message(
                    ChatCompletionMessageRole::Assistant,
                    turn.content.clone(),
                    Some(turn.role.to_string()),
                ),
            };
            messages.push(msg);
        }

        messages
    }
}

#[async_trait]
impl Agent for ChatAgent {
    fn name(&self) -> &str {
        &self.definition.name
    }

    fn role(&self) -> Actor {
        self.role
    }

    async fn generate_reply(&self, transcript: &Transcript) -> Result<String> {
        let request_id = Uuid::new_v4();
        let messages = self.build_messages(transcript);

        info!(
            "[{}] 🤖 {} generating reply | Model: {} | Context messages: {}",
            request_id,
            self.definition.name,
            self.model,
            messages.len()
        );

        let chat_completion = ChatCompletion::builder(&self.model, messages)
            .temperature(self.definition.temperature)
            .create()
            .await
            .map_err(|e| anyhow!("OpenAI API error: {}", e))?;

        if let Some(usage) = &chat_completion.usage {
            debug!(
                "[{}] 📊 Token usage - Prompt: {}, Completion: {}, Total: {}",
                request_id, usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        let response = chat_completion
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_ref())
            .ok_or_else(|| anyhow!("No response from OpenAI"))?;

        let trimmed = response.trim().to_string();
        info!(
            "[{}] ✅ {} replied | Length: {} chars",
            request_id,
            self.definition.name,
            trimmed.len()
        );
        Ok(trimmed)
    }
}

/// Plain completion backend for the turn router
pub struct ChatModel {
    model: String,
}

impl ChatModel {
    pub fn new(model: impl Into<String>) -> Self {
        ChatModel {
            model: model.into(),
        }
    }
}

#[async_trait]
impl CompletionModel for ChatModel {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let messages = vec![message(
            ChatCompletionMessageRole::User,
            prompt.to_string(),
            None,
        )];

        let chat_completion = ChatCompletion::builder(&self.model, messages)
            .create()
            .await
            .map_err(|e| anyhow!("OpenAI API error: {}", e))?;

        chat_completion
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .map(|text| text.trim().to_string())
            .ok_or_else(|| anyhow!("No response from OpenAI"))
    }
}
