//! # Debate Orchestrator
//!
//! Drives the writer/critic round loop for one blog generation request and
//! streams progress events to the caller while the debate proceeds.
//!
//! The orchestrator itself is stateless and shared; every call to
//! [`DebateOrchestrator::process_conversation`] builds its own [`RunState`],
//! so concurrent requests can never observe each other's transcripts.
//! Termination is guaranteed by two independent bounds: the deterministic
//! score backstop (a critic score above the approval threshold ends the
//! debate in code, whatever the routing model said) and the round cap.

use crate::core::transcript::{Actor, Transcript, Turn};
use crate::features::agents::Agent;
use crate::features::debate::events::StreamEvent;
use crate::features::debate::router::{RoutedActor, TurnRouter};
use crate::features::debate::score;
use anyhow::{anyhow, Result};
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;
use uuid::Uuid;

/// Event channel capacity per run
const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Status summaries keep at most this much of the routing directive
const STATUS_DIRECTIVE_LIMIT: usize = 80;

/// Policy constants bounding a single debate run
#[derive(Debug, Clone, Copy)]
pub struct DebatePolicy {
    /// Forced-stop round cap
    pub max_rounds: u32,
    /// A critic score must exceed this to approve the draft
    pub approval_threshold: u8,
    /// Per-model-call timeout within a round
    pub round_timeout: Duration,
}

impl Default for DebatePolicy {
    fn default() -> Self {
        DebatePolicy {
            max_rounds: 6,
            approval_threshold: 8,
            round_timeout: Duration::from_secs(45),
        }
    }
}

/// Per-request loop state. Built fresh for every call and discarded at the
/// end; nothing in here outlives or is shared between runs.
struct RunState {
    transcript: Transcript,
    round_count: u32,
    max_rounds: u32,
}

impl RunState {
    fn new(max_rounds: u32) -> Self {
        RunState {
            transcript: Transcript::new(),
            round_count: 0,
            max_rounds,
        }
    }
}

/// Orchestrates a writer/critic debate per request
#[derive(Clone)]
pub struct DebateOrchestrator {
    writer: Arc<dyn Agent>,
    critic: Arc<dyn Agent>,
    router: TurnRouter,
    policy: DebatePolicy,
}

impl DebateOrchestrator {
    pub fn new(
        writer: Arc<dyn Agent>,
        critic: Arc<dyn Agent>,
        router: TurnRouter,
        policy: DebatePolicy,
    ) -> Self {
        DebateOrchestrator {
            writer,
            critic,
            router,
            policy,
        }
    }

    /// Run one debate and stream its progress.
    ///
    /// Returns the receiving end of a one-shot event sequence: zero or more
    /// `Status` events followed by exactly one `Result`, or an `Err` item
    /// if an upstream model call fails. Each call is independent; invoking
    /// again re-runs the whole debate from scratch. `user_id` is used for
    /// attribution in logs only.
    pub fn process_conversation(
        &self,
        user_id: &str,
        initial_messages: Vec<Turn>,
    ) -> mpsc::Receiver<Result<StreamEvent>> {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let orchestrator = self.clone();
        let user_id = user_id.to_string();

        tokio::spawn(async move {
            let request_id = Uuid::new_v4();
            info!("[{request_id}] Starting debate for user '{user_id}'");

            match orchestrator.run(request_id, initial_messages, &tx).await {
                Ok(()) => info!("[{request_id}] Debate completed"),
                Err(e) => {
                    error!("[{request_id}] Debate failed: {e:#}");
                    // Consumer may already be gone; nothing more to do then
                    let _ = tx.send(Err(e)).await;
                }
            }
        });

        rx
    }

    /// The round loop. Emission failures mean the consumer dropped the
    /// receiver; every send is checked so a cancelled run stops issuing
    /// model calls immediately.
    async fn run(
        &self,
        request_id: Uuid,
        initial_messages: Vec<Turn>,
        tx: &mpsc::Sender<Result<StreamEvent>>,
    ) -> Result<()> {
        if !initial_messages.iter().any(|t| t.role == Actor::User) {
            return Err(anyhow!("conversation must contain a user message"));
        }

        let mut state = RunState::new(self.policy.max_rounds);
        for turn in initial_messages {
            state.transcript.push(turn);
        }

        loop {
            // Advisory routing first; the backstop below overrides it
            let directive = timeout(
                self.policy.round_timeout,
                self.router.next(&state.transcript),
            )
            .await
            .map_err(|_| anyhow!("turn routing timed out"))??;

            // Deterministic backstop: an approving critic score ends the
            // debate regardless of what the routing model answered
            if let Some(last) = state.transcript.last() {
                if last.role == Actor::Critic {
                    if let Some(value) = score::extract(&last.content) {
                        if value > self.policy.approval_threshold {
                            info!(
                                "[{request_id}] Critic approved with score {value} after round {}",
                                state.round_count
                            );
                            break;
                        }
                        debug!("[{request_id}] Critic score {value} below approval threshold");
                    }
                }
            }

            let agent = match directive.actor {
                RoutedActor::Writer => &self.writer,
                RoutedActor::Critic => &self.critic,
                RoutedActor::Unknown => {
                    warn!(
                        "[{request_id}] Unparseable routing directive '{}', defaulting to {}",
                        directive.raw_text,
                        self.writer.name()
                    );
                    &self.writer
                }
            };

            debug!(
                "[{request_id}] Round {}: {} takes the turn",
                state.round_count + 1,
                agent.name()
            );

            let reply = timeout(
                self.policy.round_timeout,
                agent.generate_reply(&state.transcript),
            )
            .await
            .map_err(|_| anyhow!("{} reply timed out", agent.name()))??;

            state.transcript.append(agent.role(), reply);

            let summary = round_summary(state.round_count + 1, agent.name(), &directive.raw_text);
            if tx.send(Ok(StreamEvent::Status(summary))).await.is_err() {
                info!("[{request_id}] Consumer disconnected, abandoning debate");
                return Ok(());
            }

            state.round_count += 1;
            if state.round_count >= state.max_rounds {
                info!(
                    "[{request_id}] Round cap of {} reached, stopping debate",
                    state.max_rounds
                );
                break;
            }
        }

        // The artifact is always the latest writer draft, never a critique
        let content = match state.transcript.last_content_by(Actor::Writer) {
            Some(content) => content.to_string(),
            None => {
                warn!("[{request_id}] No writer turn recorded, falling back to last turn");
                state
                    .transcript
                    .last()
                    .map(|t| t.content.clone())
                    .unwrap_or_default()
            }
        };

        if tx.send(Ok(StreamEvent::Result(content))).await.is_err() {
            info!("[{request_id}] Consumer disconnected before final result");
        }
        Ok(())
    }
}

/// Short human-readable summary of one round for the status stream
fn round_summary(round: u32, agent_name: &str, directive: &str) -> String {
    let flat = directive.split_whitespace().collect::<Vec<_>>().join(" ");
    let truncated = if flat.len() > STATUS_DIRECTIVE_LIMIT {
        let mut end = STATUS_DIRECTIVE_LIMIT;
        while !flat.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &flat[..end])
    } else {
        flat
    };

    if truncated.is_empty() {
        format!("Round {round}: {agent_name} takes the turn")
    } else {
        format!("Round {round}: {agent_name} | {truncated}")
    }
}
