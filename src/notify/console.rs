use async_trait::async_trait;

use crate::models::{Classification, Release, Severity};
use crate::notify::Notifier;

/// Prints alerts to stdout. Used when no Slack webhook is configured.
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    fn format_alert(release: &Release, verdict: &Classification) -> String {
        let severity = verdict.severity.to_string().to_uppercase();
        let (emoji, status) = if verdict.is_breaking {
            let emoji = if verdict.severity == Severity::High {
                "⚠️ "
            } else {
                "🔶"
            };
            (emoji, "BREAKING CHANGE DETECTED")
        } else {
            ("ℹ️ ", "Informational Update")
        };

        let mut out = String::new();
        out.push_str(&format!("\n{}\n", "=".repeat(60)));
        out.push_str(&format!("{} RELEASE ALERT\n", emoji));
        out.push_str(&format!("{}\n", "=".repeat(60)));
        out.push_str(&format!("Release: {}\n", release.title));
        out.push_str(&format!("Status: {}\n", status));
        out.push_str(&format!("Severity: {}\n", severity));
        out.push_str(&format!("\nWhy it matters:\n  {}\n", verdict.reason));
        if !verdict.affected_components.is_empty() {
            out.push_str(&format!(
                "\nAffected Components:\n  {}\n",
                verdict.affected_components.join(", ")
            ));
        }
        out.push_str(&format!("\nRelease Notes:\n  {}\n", release.url));
        out.push_str(&format!("{}\n", "=".repeat(60)));
        out
    }
}

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn deliver(&self, release: &Release, verdict: &Classification) -> bool {
        println!("{}", Self::format_alert(release, verdict));
        // Local output cannot fail
        true
    }

    fn name(&self) -> &str {
        "Console"
    }
}
