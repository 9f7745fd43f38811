use crate::ai_types::{ChatRequest, Message, ResponseFormat};
use crate::client::LlmClient;
use crate::error::LlmError;
use retroscope_core::{
    CURRENT_BLOCK_HEADER, HISTORY_BLOCK_HEADER, ResponseMode, SectionMap, SectionSchema,
    strip_markdown_fence,
};

/// Everything one analysis call needs besides the client itself.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisInput<'a> {
    pub instruction: &'a str,
    pub schema: &'a SectionSchema,
    pub history_block: &'a str,
    pub meeting_text: &'a str,
    pub response_mode: ResponseMode,
}

/// The model's feedback, both raw and mapped onto the section schema.
#[derive(Debug, Clone)]
pub struct AnalysisOutput {
    pub analysis: String,
    pub sections: SectionMap,
}

impl LlmClient {
    /// Analyzes one meeting against its team history.
    ///
    /// The raw reply is always kept verbatim in
    /// [`AnalysisOutput::analysis`]; the section map is derived from it and
    /// never invents content the model did not write.
    ///
    /// # Errors
    /// Returns an error if the completion call fails. A reply that does not
    /// contain the expected headings is not an error; the affected sections
    /// come back empty.
    pub async fn analyze_minutes(
        &self,
        input: AnalysisInput<'_>,
    ) -> Result<AnalysisOutput, LlmError> {
        let request = build_request(self.model(), input);
        let content = self.chat_completion(&request).await?;
        let sections = parse_sections(&content, input.schema, input.response_mode);
        Ok(AnalysisOutput { analysis: content, sections })
    }
}

pub(crate) fn build_request(model: &str, input: AnalysisInput<'_>) -> ChatRequest {
    let response_format = match input.response_mode {
        ResponseMode::Json => Some(ResponseFormat::json_object()),
        ResponseMode::Text => None,
    };
    ChatRequest {
        model: model.to_owned(),
        messages: vec![
            Message { role: "system".to_owned(), content: build_system_prompt(input) },
            Message {
                role: "user".to_owned(),
                content: build_user_message(input.history_block, input.meeting_text),
            },
        ],
        response_format,
    }
}

fn build_system_prompt(input: AnalysisInput<'_>) -> String {
    let mut prompt = input.instruction.to_owned();
    prompt.push_str("\n\n");
    match input.response_mode {
        ResponseMode::Text => {
            prompt.push_str(
                "Write your feedback under exactly these headings, each on its own line:\n",
            );
            for label in input.schema.labels() {
                prompt.push_str(label);
                prompt.push('\n');
            }
        },
        ResponseMode::Json => {
            prompt.push_str("Return a JSON object with exactly these string fields:\n");
            for label in input.schema.labels() {
                prompt.push_str("- \"");
                prompt.push_str(label);
                prompt.push_str("\"\n");
            }
        },
    }
    prompt
}

/// The two-block user message: accumulated history first, then the minutes
/// under analysis.
fn build_user_message(history_block: &str, meeting_text: &str) -> String {
    format!("{HISTORY_BLOCK_HEADER}\n{history_block}\n\n{CURRENT_BLOCK_HEADER}\n{meeting_text}")
}

pub(crate) fn parse_sections(
    content: &str,
    schema: &SectionSchema,
    mode: ResponseMode,
) -> SectionMap {
    if mode == ResponseMode::Json {
        let stripped = strip_markdown_fence(content);
        match serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(stripped) {
            Ok(object) => {
                let pairs = object.into_iter().map(|(key, value)| {
                    let text = match value {
                        serde_json::Value::String(s) => s,
                        other => other.to_string(),
                    };
                    (key, text)
                });
                return schema.conform(pairs);
            },
            Err(e) => {
                tracing::warn!("Model reply is not valid JSON, splitting by headings instead: {e}");
            },
        }
    }
    schema.split(content)
}
