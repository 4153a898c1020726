pub const SYSTEM_PROMPT: &str = r#"You are an expert protocol engineer reviewing release notes for a blockchain node implementation.
Your task is to decide whether a release is likely to break downstream consumers.

You must respond with valid JSON matching this exact structure:
{
    "is_breaking": true/false,
    "severity": "high"/"medium"/"low",
    "reason": "Brief explanation of why this is/isn't breaking",
    "affected_components": ["list", "of", "affected", "components"]
}

Return ONLY the JSON object, no other text."#;

/// Builds the per-release classification prompt with the criteria each
/// severity tier is judged against.
pub fn classification_prompt(title: &str, body: &str) -> String {
    format!(
        r#"Analyze this release for breaking changes.

Release Title: {title}

Release Notes:
{body}

Classify this release based on these criteria:

BREAKING CHANGES (is_breaking=true, severity=high):
- Changes to block structure or transaction format
- Changes to RPC endpoints (removed/modified endpoints)
- Consensus rule changes
- Hard forks or network upgrades
- Database format changes requiring migration
- API breaking changes

POTENTIALLY BREAKING (is_breaking=true, severity=medium):
- Major version bumps
- Deprecated features that still work but will be removed
- Configuration changes that may affect existing setups
- Performance changes that significantly alter behavior

INFORMATIONAL (is_breaking=false, severity=low):
- Bug fixes
- Minor updates
- Security patches that don't change APIs
- Documentation updates

Provide your analysis as JSON:"#
    )
}
