use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::models::{Classification, Release, Severity};
use crate::notify::Notifier;

/// Posts alerts to a Slack incoming webhook using Block Kit layout.
pub struct SlackNotifier {
    client: Client,
    webhook_url: Url,
}

impl SlackNotifier {
    pub fn new(webhook_url: &str) -> Result<Self> {
        let webhook_url = webhook_url
            .parse::<Url>()
            .map_err(|e| Error::Config(format!("invalid Slack webhook URL: {}", e)))?;

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Ok(Self {
            client,
            webhook_url,
        })
    }

    fn build_payload(release: &Release, verdict: &Classification) -> Value {
        let severity = verdict.severity.to_string().to_uppercase();
        let (emoji, status) = if verdict.is_breaking {
            let emoji = if verdict.severity == Severity::High {
                ":warning:"
            } else {
                ":large_orange_diamond:"
            };
            (emoji, "BREAKING CHANGE DETECTED")
        } else {
            (":information_source:", "Informational Update")
        };

        let mut blocks = vec![
            json!({
                "type": "header",
                "text": {
                    "type": "plain_text",
                    "text": format!("{} Release: {}", emoji, release.title)
                }
            }),
            json!({
                "type": "section",
                "fields": [
                    {"type": "mrkdwn", "text": format!("*Status:*\n{}", status)},
                    {"type": "mrkdwn", "text": format!("*Severity:*\n{}", severity)}
                ]
            }),
            json!({
                "type": "section",
                "text": {
                    "type": "mrkdwn",
                    "text": format!("*Why it matters:*\n{}", verdict.reason)
                }
            }),
        ];

        if !verdict.affected_components.is_empty() {
            blocks.push(json!({
                "type": "section",
                "text": {
                    "type": "mrkdwn",
                    "text": format!(
                        "*Affected Components:*\n{}",
                        verdict.affected_components.join(", ")
                    )
                }
            }));
        }

        blocks.push(json!({
            "type": "section",
            "text": {
                "type": "mrkdwn",
                "text": format!("<{}|View Release Notes>", release.url)
            }
        }));

        json!({
            "text": format!("New Release: {}", release.title),
            "blocks": blocks
        })
    }
}

#[async_trait]
impl Notifier for SlackNotifier {
    async fn deliver(&self, release: &Release, verdict: &Classification) -> bool {
        let payload = Self::build_payload(release, verdict);

        match self
            .client
            .post(self.webhook_url.clone())
            .json(&payload)
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => {
                tracing::info!("Slack notification sent for {}", release.title);
                true
            }
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                tracing::warn!("Slack notification failed: {} - {}", status, body);
                false
            }
            Err(e) => {
                tracing::warn!("Error sending Slack notification: {}", e);
                false
            }
        }
    }

    fn name(&self) -> &str {
        "Slack"
    }
}
