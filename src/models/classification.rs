use serde::{Deserialize, Serialize};

/// Breaking-change verdict for a single release. Produced fresh per
/// release and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub is_breaking: bool,
    pub severity: Severity,
    pub reason: String,
    pub affected_components: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::High => write!(f, "high"),
            Severity::Medium => write!(f, "medium"),
            Severity::Low => write!(f, "low"),
        }
    }
}

impl Classification {
    /// Safe default used when analysis itself fails. A degraded verdict
    /// must never block delivery of the release alert.
    pub fn degraded(cause: &str) -> Self {
        Self {
            is_breaking: false,
            severity: Severity::Low,
            reason: format!("analysis failed: {}", cause),
            affected_components: vec!["unknown".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Severity::High).unwrap(), r#""high""#);
        let parsed: Severity = serde_json::from_str(r#""medium""#).unwrap();
        assert_eq!(parsed, Severity::Medium);
    }

    #[test]
    fn degraded_verdict_is_non_breaking_low() {
        let verdict = Classification::degraded("timeout");
        assert!(!verdict.is_breaking);
        assert_eq!(verdict.severity, Severity::Low);
        assert_eq!(verdict.reason, "analysis failed: timeout");
        assert_eq!(verdict.affected_components, vec!["unknown"]);
    }
}
