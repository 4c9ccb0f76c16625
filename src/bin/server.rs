use anyhow::Result;
use dotenvy::dotenv;
use log::info;
use std::sync::Arc;
use std::time::Duration;

use blogforge::core::Config;
use blogforge::features::agents::{AgentFactory, ChatModel};
use blogforge::features::debate::{DebateOrchestrator, DebatePolicy, TurnRouter};
use blogforge::http::HttpServer;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    // Ensure OPENAI_API_KEY is set in environment for the openai crate
    // The openai crate reads from env vars, not from our config
    // Set both OPENAI_API_KEY and OPENAI_KEY for compatibility
    std::env::set_var("OPENAI_API_KEY", &config.openai_api_key);
    std::env::set_var("OPENAI_KEY", &config.openai_api_key);

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting blogforge server...");

    // Build the debate participants from their YAML definitions
    let factory = AgentFactory::new(config.openai_model.clone());
    let (writer, critic) = factory.load_debate_pair(&config.agents_dir)?;

    let router = TurnRouter::new(Arc::new(ChatModel::new(config.openai_model.clone())));
    let policy = DebatePolicy {
        max_rounds: config.max_rounds,
        approval_threshold: config.approval_threshold,
        round_timeout: Duration::from_secs(config.round_timeout_secs),
    };
    let orchestrator = DebateOrchestrator::new(writer, critic, router, policy);

    info!(
        "Debate policy: max {} rounds, approval above {}, {}s round timeout",
        config.max_rounds, config.approval_threshold, config.round_timeout_secs
    );

    let server = HttpServer::new(orchestrator, config.bind_address.clone());
    server.run().await
}
