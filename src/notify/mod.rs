pub mod console;
pub mod slack;

use async_trait::async_trait;

use crate::models::{Classification, Release};

pub use console::ConsoleNotifier;
pub use slack::SlackNotifier;

/// Delivers a formatted alert through one concrete channel.
///
/// `deliver` never fails at the type level: transport errors are caught
/// internally and reported as `false`, leaving the release unmarked so it
/// is retried on the next polling cycle.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, release: &Release, verdict: &Classification) -> bool;
    fn name(&self) -> &str;
}

/// Picks the notification strategy once at startup. A configured Slack
/// webhook selects the Slack strategy; a missing or unusable webhook falls
/// back to console output with a log line, never an error.
pub fn select_notifier(webhook_url: Option<&str>) -> Box<dyn Notifier> {
    match webhook_url {
        Some(url) => match SlackNotifier::new(url) {
            Ok(slack) => Box::new(slack),
            Err(e) => {
                tracing::warn!("Slack webhook unusable ({}), using console output", e);
                Box::new(ConsoleNotifier)
            }
        },
        None => {
            tracing::info!("SLACK_WEBHOOK_URL not configured, using console output");
            Box::new(ConsoleNotifier)
        }
    }
}
