//! The extraction schema: one shared description of the record shape
//!
//! The schema is the contract between the prompt and the parser. The
//! format-instruction text embedded in every prompt and the validator that
//! parses candidate model output are both derived from the same field list,
//! so the instruction text and the parser cannot drift out of sync.

use crate::error::ExtractorError;
use ledgermail_domain::TransactionRecord;
use serde_json::Value;

/// The coercion applied to a field's candidate value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text; the candidate value must be a JSON string
    Text,
    /// Decimal number; accepts a JSON number or a numeric string
    /// (thousands separators tolerated)
    Decimal,
}

impl FieldKind {
    fn json_type(&self) -> &'static str {
        match self {
            FieldKind::Text => "string",
            FieldKind::Decimal => "number",
        }
    }

    fn coerce(&self, name: &str, raw: &Value) -> Result<Value, ExtractorError> {
        match self {
            FieldKind::Text => match raw {
                Value::String(s) => Ok(Value::String(s.clone())),
                other => Err(ExtractorError::MalformedOutput(format!(
                    "field '{}' is not a string: {}",
                    name, other
                ))),
            },
            FieldKind::Decimal => {
                let parsed = match raw {
                    Value::Number(n) => n.as_f64(),
                    Value::String(s) => s.replace(',', "").trim().parse::<f64>().ok(),
                    _ => None,
                };
                let number = parsed.ok_or_else(|| {
                    ExtractorError::MalformedOutput(format!(
                        "field '{}' is not numeric: {}",
                        name, raw
                    ))
                })?;
                serde_json::Number::from_f64(number)
                    .map(Value::Number)
                    .ok_or_else(|| {
                        ExtractorError::MalformedOutput(format!(
                            "field '{}' is not a finite number: {}",
                            name, raw
                        ))
                    })
            }
        }
    }
}

/// One field of the record shape
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Field name as it appears in the model output
    pub name: &'static str,

    /// Coercion applied to the candidate value
    pub kind: FieldKind,

    /// Prose description embedded in the format instructions
    pub description: &'static str,
}

/// The fixed, versionless record shape the model is asked to produce
#[derive(Debug, Clone)]
pub struct RecordSchema {
    fields: Vec<FieldSpec>,
}

impl RecordSchema {
    /// The transaction-alert schema: six required fields
    pub fn transaction() -> Self {
        Self {
            fields: vec![
                FieldSpec {
                    name: "date",
                    kind: FieldKind::Text,
                    description: "The exact date of when the transaction occurred",
                },
                FieldSpec {
                    name: "time",
                    kind: FieldKind::Text,
                    description: "The exact time the transaction occurred",
                },
                FieldSpec {
                    name: "amount",
                    kind: FieldKind::Decimal,
                    description: "The total cost of the transaction",
                },
                FieldSpec {
                    name: "merchant",
                    kind: FieldKind::Text,
                    description: "The person who the transaction occurred between",
                },
                FieldSpec {
                    name: "status",
                    kind: FieldKind::Text,
                    description: "Whether or not the transaction was approved or declined",
                },
                FieldSpec {
                    name: "type",
                    kind: FieldKind::Text,
                    description: "The type of transaction",
                },
            ],
        }
    }

    /// The fields in output-column order
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Comma-separated field names, for the prompt's goal line
    pub fn field_list(&self) -> String {
        self.fields
            .iter()
            .map(|f| f.name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Generate the format-instruction text embedded in every prompt.
    ///
    /// Regenerated per run from the field list, never hardcoded.
    pub fn format_instructions(&self) -> String {
        let properties = self
            .fields
            .iter()
            .map(|f| {
                format!(
                    "\"{}\": {{\"description\": \"{}\", \"type\": \"{}\"}}",
                    f.name,
                    f.description,
                    f.kind.json_type()
                )
            })
            .collect::<Vec<_>>()
            .join(", ");

        let required = self
            .fields
            .iter()
            .map(|f| format!("\"{}\"", f.name))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "The output should be formatted as a JSON instance that conforms to the JSON schema below.\n\n\
             Here is the output schema:\n\
             {{\"properties\": {{{}}}, \"required\": [{}]}}\n\n\
             Return ONLY the JSON object, no markdown code blocks, no explanations.",
            properties, required
        )
    }

    /// Validate and coerce a candidate JSON value into a record.
    ///
    /// Every schema field must be present; `Decimal` fields accept a number
    /// or a numeric string. Extra fields in the candidate are ignored.
    pub fn parse(&self, candidate: &Value) -> Result<TransactionRecord, ExtractorError> {
        let object = candidate.as_object().ok_or_else(|| {
            ExtractorError::MalformedOutput("expected a JSON object".to_string())
        })?;

        let mut coerced = serde_json::Map::new();
        for spec in &self.fields {
            let raw = object.get(spec.name).ok_or_else(|| {
                ExtractorError::MalformedOutput(format!("missing field '{}'", spec.name))
            })?;
            coerced.insert(spec.name.to_string(), spec.kind.coerce(spec.name, raw)?);
        }

        serde_json::from_value(Value::Object(coerced))
            .map_err(|e| ExtractorError::MalformedOutput(e.to_string()))
    }
}

impl Default for RecordSchema {
    fn default() -> Self {
        Self::transaction()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_instructions_name_every_field() {
        let schema = RecordSchema::transaction();
        let instructions = schema.format_instructions();

        for spec in schema.fields() {
            assert!(instructions.contains(spec.name), "missing {}", spec.name);
            assert!(instructions.contains(spec.description));
        }
        assert!(instructions.contains("\"required\""));
    }

    #[test]
    fn test_field_list_is_ordered() {
        let schema = RecordSchema::transaction();
        assert_eq!(schema.field_list(), "date, time, amount, merchant, status, type");
    }

    #[test]
    fn test_parse_valid_object() {
        let schema = RecordSchema::transaction();
        let record = schema
            .parse(&json!({
                "date": "2024-05-01",
                "time": "14:32",
                "amount": 2500.0,
                "merchant": "ABC FOODS",
                "status": "approved",
                "type": "debit"
            }))
            .unwrap();

        assert_eq!(record.date, "2024-05-01");
        assert_eq!(record.time, "14:32");
        assert_eq!(record.amount, 2500.0);
        assert_eq!(record.merchant, "ABC FOODS");
        assert_eq!(record.status, "approved");
        assert_eq!(record.kind, "debit");
    }

    #[test]
    fn test_parse_amount_from_string_with_separators() {
        let schema = RecordSchema::transaction();
        let record = schema
            .parse(&json!({
                "date": "2024-05-01",
                "time": "14:32",
                "amount": "2,500.00",
                "merchant": "ABC FOODS",
                "status": "approved",
                "type": "debit"
            }))
            .unwrap();

        assert_eq!(record.amount, 2500.0);
    }

    #[test]
    fn test_parse_missing_field_names_the_field() {
        let schema = RecordSchema::transaction();
        let err = schema
            .parse(&json!({
                "date": "2024-05-01",
                "time": "14:32",
                "amount": 2500.0,
                "merchant": "ABC FOODS",
                "status": "approved"
            }))
            .unwrap_err();

        assert!(err.to_string().contains("missing field 'type'"));
    }

    #[test]
    fn test_parse_non_numeric_amount_fails() {
        let schema = RecordSchema::transaction();
        let err = schema
            .parse(&json!({
                "date": "2024-05-01",
                "time": "14:32",
                "amount": "a lot",
                "merchant": "ABC FOODS",
                "status": "approved",
                "type": "debit"
            }))
            .unwrap_err();

        assert!(matches!(err, ExtractorError::MalformedOutput(_)));
        assert!(err.to_string().contains("amount"));
    }

    #[test]
    fn test_parse_non_string_text_field_fails() {
        let schema = RecordSchema::transaction();
        let err = schema
            .parse(&json!({
                "date": 20240501,
                "time": "14:32",
                "amount": 2500.0,
                "merchant": "ABC FOODS",
                "status": "approved",
                "type": "debit"
            }))
            .unwrap_err();

        assert!(err.to_string().contains("date"));
    }

    #[test]
    fn test_parse_ignores_extra_fields() {
        let schema = RecordSchema::transaction();
        let record = schema
            .parse(&json!({
                "date": "2024-05-01",
                "time": "14:32",
                "amount": 100.0,
                "merchant": "X",
                "status": "approved",
                "type": "debit",
                "note": "ignored"
            }))
            .unwrap();

        assert_eq!(record.merchant, "X");
    }

    #[test]
    fn test_parse_rejects_non_object() {
        let schema = RecordSchema::transaction();
        assert!(schema.parse(&json!(["not", "an", "object"])).is_err());
    }

    // The round-trip law: a record serialized to the described shape must
    // parse back to equal field values.
    #[test]
    fn test_schema_round_trip() {
        let schema = RecordSchema::transaction();
        let original = ledgermail_domain::TransactionRecord {
            date: "2024-05-01".to_string(),
            time: "14:32".to_string(),
            amount: 2500.0,
            merchant: "ABC FOODS".to_string(),
            status: "approved".to_string(),
            kind: "debit".to_string(),
        };

        let emitted = serde_json::to_value(&original).unwrap();
        let parsed = schema.parse(&emitted).unwrap();

        assert_eq!(parsed, original);
    }
}
