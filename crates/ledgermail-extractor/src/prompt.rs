//! LLM prompt engineering for transaction extraction

use crate::schema::RecordSchema;

/// Builds the model-input string for one message body
///
/// The prompt is a deterministic composition of a fixed role preamble, the
/// extraction goal, the message body verbatim, and the schema's format
/// instructions. Both the goal's field list and the format instructions are
/// derived from the schema at build time.
pub struct PromptBuilder {
    body: String,
}

impl PromptBuilder {
    /// Create a prompt builder for one message body
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    /// Build the complete extraction prompt
    pub fn build(&self, schema: &RecordSchema) -> String {
        let mut prompt = String::new();

        // 1. Role/context preamble
        prompt.push_str(CONTEXT_PREAMBLE);
        prompt.push('\n');

        // 2. Extraction goal with the schema's field list
        prompt.push_str("# Goal\n");
        prompt.push_str(&format!(
            "Without commenting, adding comments or notes, extract the following from EMAIL TRANSACTION DATA: {}\n",
            schema.field_list()
        ));

        // 3. The message body verbatim
        prompt.push_str("# EMAIL TRANSACTION DATA\n");
        prompt.push_str(&self.body);
        prompt.push('\n');

        // 4. Format instructions
        prompt.push_str("# Format\n");
        prompt.push_str(&schema.format_instructions());

        prompt
    }
}

const CONTEXT_PREAMBLE: &str = "# Context\nBelow are bodies of text which contain transaction data.";
