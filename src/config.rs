use crate::error::{Error, Result};
use std::env;

pub const DEFAULT_REPO: &str = "ethereum/go-ethereum";
pub const DEFAULT_LEDGER_PATH: &str = "seen_releases.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: String,
    pub anthropic_api_key: String,
    pub slack_webhook_url: Option<String>,
    pub repo: String,
    pub check_interval_secs: u64,
    pub fetch_limit: u32,
    pub ledger_path: String,
    pub claude_model: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let github_token = env::var("GITHUB_TOKEN")
            .map_err(|_| Error::Config("GITHUB_TOKEN environment variable not set".to_string()))?;

        let anthropic_api_key = env::var("ANTHROPIC_API_KEY").map_err(|_| {
            Error::Config("ANTHROPIC_API_KEY environment variable not set".to_string())
        })?;

        let slack_webhook_url = env::var("SLACK_WEBHOOK_URL").ok().filter(|v| !v.is_empty());

        let repo = env::var("WATCH_REPO").unwrap_or_else(|_| DEFAULT_REPO.to_string());

        let check_interval_secs = match env::var("CHECK_INTERVAL") {
            Ok(v) => v
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    Error::Config(format!(
                        "CHECK_INTERVAL must be a positive number of seconds, got {:?}",
                        v
                    ))
                })?,
            Err(_) => 600,
        };

        let fetch_limit = env::var("FETCH_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let ledger_path =
            env::var("LEDGER_PATH").unwrap_or_else(|_| DEFAULT_LEDGER_PATH.to_string());

        let claude_model = env::var("CLAUDE_MODEL").ok().filter(|v| !v.is_empty());

        Ok(Self {
            github_token,
            anthropic_api_key,
            slack_webhook_url,
            repo,
            check_interval_secs,
            fetch_limit,
            ledger_path,
            claude_model,
        })
    }
}
