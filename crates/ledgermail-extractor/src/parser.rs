//! Parse LLM output into a transaction record

use crate::error::ExtractorError;
use crate::schema::RecordSchema;
use ledgermail_domain::TransactionRecord;
use serde_json::Value;

/// Parse one LLM response against the schema
///
/// Models sometimes wrap JSON in markdown code blocks despite being told
/// not to; fences are stripped before parsing.
pub fn parse_response(
    schema: &RecordSchema,
    response: &str,
) -> Result<TransactionRecord, ExtractorError> {
    let json_str = extract_json(response)?;

    let candidate: Value = serde_json::from_str(&json_str)
        .map_err(|e| ExtractorError::MalformedOutput(format!("JSON parse error: {}", e)))?;

    schema.parse(&candidate)
}

/// Extract JSON from response, handling markdown code blocks
fn extract_json(response: &str) -> Result<String, ExtractorError> {
    let trimmed = response.trim();

    // Check if wrapped in markdown code block
    if trimmed.starts_with("```json") || trimmed.starts_with("```") {
        // Find the actual JSON content
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return Err(ExtractorError::MalformedOutput(
                "Empty code block".to_string(),
            ));
        }

        // Skip first line (```json or ```) and last line (```)
        let json_lines = &lines[1..lines.len().saturating_sub(1)];
        Ok(json_lines.join("\n"))
    } else {
        // Already raw JSON
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "date": "2024-05-01",
        "time": "14:32",
        "amount": 2500.0,
        "merchant": "ABC FOODS",
        "status": "approved",
        "type": "debit"
    }"#;

    #[test]
    fn test_parse_raw_json() {
        let record = parse_response(&RecordSchema::transaction(), VALID).unwrap();
        assert_eq!(record.merchant, "ABC FOODS");
        assert_eq!(record.amount, 2500.0);
    }

    #[test]
    fn test_parse_json_with_markdown_wrapper() {
        let wrapped = format!("```json\n{}\n```", VALID);
        let record = parse_response(&RecordSchema::transaction(), &wrapped).unwrap();
        assert_eq!(record.date, "2024-05-01");
    }

    #[test]
    fn test_parse_json_with_bare_fence() {
        let wrapped = format!("```\n{}\n```", VALID);
        let record = parse_response(&RecordSchema::transaction(), &wrapped).unwrap();
        assert_eq!(record.status, "approved");
    }

    #[test]
    fn test_parse_non_json_fails() {
        let result = parse_response(&RecordSchema::transaction(), "This is not JSON");
        assert!(matches!(result, Err(ExtractorError::MalformedOutput(_))));
    }

    #[test]
    fn test_parse_array_fails() {
        let result = parse_response(&RecordSchema::transaction(), &format!("[{}]", VALID));
        assert!(matches!(result, Err(ExtractorError::MalformedOutput(_))));
    }

    #[test]
    fn test_extract_json_from_plain_json() {
        let json = r#"{"key": "value"}"#;
        let result = extract_json(json).unwrap();
        assert_eq!(result, json);
    }

    #[test]
    fn test_extract_json_from_markdown() {
        let response = "```json\n{\"key\": \"value\"}\n```";
        let result = extract_json(response).unwrap();
        assert_eq!(result.trim(), r#"{"key": "value"}"#);
    }
}
