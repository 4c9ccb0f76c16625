//! # Configuration
//!
//! Environment-driven service configuration. All knobs come from env vars
//! (optionally loaded from a `.env` file by the binary) so the service can
//! run unchanged in containers and local dev.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.2.0: Added debate policy knobs (rounds, threshold, timeout)
//! - 1.1.0: Added agents directory override
//! - 1.0.0: Initial creation

use anyhow::{anyhow, Context, Result};
use std::env;

/// Default chat model when OPENAI_MODEL is not set
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default listen address for the HTTP API
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";

/// Hard stop for the debate loop when the critic never approves
const DEFAULT_MAX_ROUNDS: u32 = 6;

/// A critic score must be strictly greater than this to approve the draft
const DEFAULT_APPROVAL_THRESHOLD: u8 = 8;

/// Per-round model call timeout in seconds
const DEFAULT_ROUND_TIMEOUT_SECS: u64 = 45;

/// Service configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_model: String,
    pub bind_address: String,
    pub max_rounds: u32,
    pub approval_threshold: u8,
    pub round_timeout_secs: u64,
    pub agents_dir: String,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY")
            .context("OPENAI_API_KEY must be set (see .env.example)")?;

        let openai_model =
            env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let bind_address =
            env::var("BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string());

        let max_rounds = match env::var("DEBATE_MAX_ROUNDS") {
            Ok(raw) => raw
                .parse::<u32>()
                .map_err(|_| anyhow!("DEBATE_MAX_ROUNDS must be a positive integer, got '{raw}'"))?,
            Err(_) => DEFAULT_MAX_ROUNDS,
        };
        if max_rounds == 0 {
            return Err(anyhow!("DEBATE_MAX_ROUNDS must be at least 1"));
        }

        let approval_threshold = match env::var("DEBATE_APPROVAL_THRESHOLD") {
            Ok(raw) => raw.parse::<u8>().map_err(|_| {
                anyhow!("DEBATE_APPROVAL_THRESHOLD must be an integer from 1 to 10, got '{raw}'")
            })?,
            Err(_) => DEFAULT_APPROVAL_THRESHOLD,
        };
        if !(1..=10).contains(&approval_threshold) {
            return Err(anyhow!(
                "DEBATE_APPROVAL_THRESHOLD must be between 1 and 10, got {approval_threshold}"
            ));
        }

        let round_timeout_secs = match env::var("DEBATE_ROUND_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                anyhow!("DEBATE_ROUND_TIMEOUT_SECS must be a positive integer, got '{raw}'")
            })?,
            Err(_) => DEFAULT_ROUND_TIMEOUT_SECS,
        };
        if round_timeout_secs == 0 {
            return Err(anyhow!("DEBATE_ROUND_TIMEOUT_SECS must be at least 1"));
        }

        let agents_dir =
            env::var("AGENTS_CONFIG_DIR").unwrap_or_else(|_| "agents".to_string());

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            openai_api_key,
            openai_model,
            bind_address,
            max_rounds,
            approval_threshold,
            round_timeout_secs,
            agents_dir,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Process-wide env mutation; serialize the tests that touch it
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_debate_vars() {
        env::remove_var("OPENAI_MODEL");
        env::remove_var("BIND_ADDRESS");
        env::remove_var("DEBATE_MAX_ROUNDS");
        env::remove_var("DEBATE_APPROVAL_THRESHOLD");
        env::remove_var("DEBATE_ROUND_TIMEOUT_SECS");
        env::remove_var("AGENTS_CONFIG_DIR");
        env::remove_var("LOG_LEVEL");
    }

    #[test]
    fn test_defaults_applied() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_debate_vars();
        env::set_var("OPENAI_API_KEY", "test-key");

        let config = Config::from_env().unwrap();
        assert_eq!(config.openai_model, DEFAULT_MODEL);
        assert_eq!(config.max_rounds, DEFAULT_MAX_ROUNDS);
        assert_eq!(config.approval_threshold, DEFAULT_APPROVAL_THRESHOLD);
        assert_eq!(config.round_timeout_secs, DEFAULT_ROUND_TIMEOUT_SECS);
        assert_eq!(config.agents_dir, "agents");
    }

    #[test]
    fn test_missing_api_key_is_an_error() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_debate_vars();
        env::remove_var("OPENAI_API_KEY");

        let result = Config::from_env();
        assert!(result.is_err());

        // Restore for sibling tests that set it
        env::set_var("OPENAI_API_KEY", "test-key");
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_debate_vars();
        env::set_var("OPENAI_API_KEY", "test-key");
        env::set_var("DEBATE_APPROVAL_THRESHOLD", "11");

        assert!(Config::from_env().is_err());
        env::remove_var("DEBATE_APPROVAL_THRESHOLD");
    }

    #[test]
    fn test_zero_rounds_rejected() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_debate_vars();
        env::set_var("OPENAI_API_KEY", "test-key");
        env::set_var("DEBATE_MAX_ROUNDS", "0");

        assert!(Config::from_env().is_err());
        env::remove_var("DEBATE_MAX_ROUNDS");
    }
}
