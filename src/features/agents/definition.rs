//! Declarative agent definitions loaded from YAML files.
//!
//! A definition carries everything needed to stand up one debate
//! participant: its name, a short description, the system instructions,
//! the sampling temperature, and the plugin allowlist. The service never
//! hard-codes agent behavior; changing a participant means editing its
//! YAML file, not the code.

use crate::core::transcript::Actor;
use crate::features::agents::chat::ChatAgent;
use crate::features::agents::Agent;
use anyhow::{anyhow, Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

fn default_temperature() -> f32 {
    0.5
}

/// One agent as described by its YAML definition file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub instructions: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Plugin allowlist, kept for definition-file compatibility
    #[serde(default)]
    pub included_plugins: Vec<String>,
}

impl AgentDefinition {
    pub fn from_yaml(raw: &str) -> Result<Self> {
        serde_yaml::from_str(raw).context("failed to parse agent definition YAML")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read agent definition {}", path.display()))?;
        Self::from_yaml(&raw)
    }
}

/// Builds concrete agents from definition files and a target model id.
///
/// The orchestrator never constructs agents itself; it receives boxed
/// `Agent`s from here and only invokes their capability.
#[derive(Debug, Clone)]
pub struct AgentFactory {
    model: String,
}

impl AgentFactory {
    pub fn new(model: impl Into<String>) -> Self {
        AgentFactory {
            model: model.into(),
        }
    }

    /// Build an agent from an already-parsed definition
    pub fn build(&self, definition: AgentDefinition) -> Result<Arc<dyn Agent>> {
        let role = Actor::from_agent_name(&definition.name).ok_or_else(|| {
            anyhow!(
                "agent definition '{}' does not name a known debate role",
                definition.name
            )
        })?;
        if role == Actor::User {
            return Err(anyhow!("'{}' is not a valid agent role", definition.name));
        }

        info!(
            "Built agent '{}' (role: {role}, temperature: {})",
            definition.name, definition.temperature
        );
        Ok(Arc::new(ChatAgent::new(
            definition,
            role,
            self.model.clone(),
        )))
    }

    /// Load a definition file and build the agent it describes
    pub fn from_file(&self, path: &Path) -> Result<Arc<dyn Agent>> {
        let definition = AgentDefinition::load(path)?;
        self.build(definition)
    }

    /// Load the writer/critic pair from the agents directory
    pub fn load_debate_pair(&self, agents_dir: &str) -> Result<(Arc<dyn Agent>, Arc<dyn Agent>)> {
        let dir = Path::new(agents_dir);
        let writer = self.from_file(&dir.join("writer.yaml"))?;
        let critic = self.from_file(&dir.join("critic.yaml"))?;
        Ok((writer, critic))
    }
}
