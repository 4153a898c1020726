use crate::error::{Error, Result};
use crate::models::Classification;

/// Parses the model's verdict out of its raw text response. The model is
/// told to return bare JSON but may wrap it in a code fence or prose.
pub fn parse_classification(response: &str) -> Result<Classification> {
    let json_str = extract_json(response)?;

    serde_json::from_str(&json_str)
        .map_err(|e| Error::ParseError(format!("Failed to parse classification: {}", e)))
}

fn extract_json(text: &str) -> Result<String> {
    // Markdown code fence with a json tag
    if let Some(start) = text.find("```json") {
        let start = start + 7;
        if let Some(end) = text[start..].find("```") {
            return Ok(text[start..start + end].trim().to_string());
        }
    }

    // Plain code fence
    if let Some(start) = text.find("```") {
        let start = start + 3;
        // Skip a language identifier on the same line
        let start = text[start..]
            .find('\n')
            .map(|i| start + i + 1)
            .unwrap_or(start);
        if let Some(end) = text[start..].find("```") {
            let content = text[start..start + end].trim();
            if content.starts_with('{') {
                return Ok(content.to_string());
            }
        }
    }

    // First balanced object in the raw text
    if let Some(start) = text.find('{') {
        let mut depth = 0;
        let mut end = start;
        let mut in_string = false;
        let mut escape_next = false;

        for (i, c) in text[start..].char_indices() {
            if escape_next {
                escape_next = false;
                continue;
            }

            match c {
                '\\' if in_string => escape_next = true,
                '"' => in_string = !in_string,
                '{' if !in_string => depth += 1,
                '}' if !in_string => {
                    depth -= 1;
                    if depth == 0 {
                        end = start + i + 1;
                        break;
                    }
                }
                _ => {}
            }
        }

        if depth == 0 && end > start {
            return Ok(text[start..end].to_string());
        }
    }

    Err(Error::ParseError(
        "No valid JSON found in response".to_string(),
    ))
}
