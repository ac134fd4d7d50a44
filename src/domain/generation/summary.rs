//! Summary generator.
//!
//! Asks the completion service for a three-part analysis of the finished
//! conversation and parses the reply defensively: missing or mistyped
//! pieces default to empty rather than failing the whole call.

use serde_json::{Map, Value};

use crate::domain::transcript::Turn;
use crate::ports::{CompletionProvider, CompletionRequest, Message};

use super::{render_transcript, GenerationError};

const MAX_TOKENS: u32 = 2000;
const TEMPERATURE: f32 = 0.7;

/// The three-part result of summarizing a conversation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryParts {
    /// Prose summary of the interview.
    pub summary: String,
    /// Ordered list of short extracted insights.
    pub key_insights: Vec<String>,
    /// Open-ended structured data; the model decides the keys.
    pub structured_data: Map<String, Value>,
}

/// Generates the end-of-session summary from the full transcript.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryGenerator;

impl SummaryGenerator {
    /// Creates a new summary generator.
    pub fn new() -> Self {
        Self
    }

    /// Summarize the conversation.
    ///
    /// # Errors
    ///
    /// - `Provider` if the completion call fails
    /// - `MalformedCompletion` if the reply is not a JSON object at all;
    ///   partial shapes are tolerated and defaulted instead
    pub async fn generate(
        &self,
        provider: &dyn CompletionProvider,
        topic_prompt: &str,
        transcript: &[Turn],
    ) -> Result<SummaryParts, GenerationError> {
        let system_prompt = format!(
            "You are analyzing an interview that was conducted based on this prompt: \"{topic_prompt}\".\n\n\
             Analyze the conversation and provide:\n\
             1. A comprehensive summary of the interview (2-3 paragraphs)\n\
             2. Key insights extracted (5-10 bullet points)\n\
             3. Structured data extracted from the conversation (as a JSON object with relevant fields)\n\n\
             Return your response as a JSON object with this structure:\n\
             {{\n\
               \"summary\": \"...\",\n\
               \"keyInsights\": [\"...\", \"...\"],\n\
               \"structuredData\": {{ ... }}\n\
             }}"
        );

        let user_message = format!(
            "Analyze this interview conversation:\n\n{}\n\nProvide the summary, key insights, and structured data as specified.",
            render_transcript(transcript)
        );

        let request = CompletionRequest::new()
            .with_system_prompt(system_prompt)
            .with_message(Message::user(user_message))
            .with_max_tokens(MAX_TOKENS)
            .with_temperature(TEMPERATURE);

        let response = provider.complete(request).await?;

        parse_summary(&response.content)
    }
}

/// Parses the provider's reply into `SummaryParts`.
///
/// Accepts fenced JSON and replies with surrounding prose; only a reply
/// with no JSON object at all is an error.
fn parse_summary(content: &str) -> Result<SummaryParts, GenerationError> {
    let json = extract_json_object(content).ok_or_else(|| {
        GenerationError::MalformedCompletion("no JSON object in completion".to_string())
    })?;

    let value: Value = serde_json::from_str(json)
        .map_err(|e| GenerationError::MalformedCompletion(e.to_string()))?;

    let object = value.as_object().ok_or_else(|| {
        GenerationError::MalformedCompletion("completion is not a JSON object".to_string())
    })?;

    let summary = object
        .get("summary")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let key_insights = object
        .get("keyInsights")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let structured_data = object
        .get("structuredData")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    Ok(SummaryParts {
        summary,
        key_insights,
        structured_data,
    })
}

/// Locates the JSON object within a completion, stripping markdown fences
/// and surrounding prose.
fn extract_json_object(content: &str) -> Option<&str> {
    let trimmed = content.trim();

    let without_fences = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed);

    let start = without_fences.find('{')?;
    let end = without_fences.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&without_fences[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SessionId;
    use crate::ports::{CompletionError, CompletionResponse, FinishReason, ProviderInfo, TokenUsage};
    use async_trait::async_trait;
    use serde_json::json;

    struct FixedProvider {
        content: String,
    }

    #[async_trait]
    impl CompletionProvider for FixedProvider {
        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> Result<CompletionResponse, CompletionError> {
            Ok(CompletionResponse {
                content: self.content.clone(),
                usage: TokenUsage::zero(),
                model: "test-model".to_string(),
                finish_reason: FinishReason::Stop,
            })
        }

        fn provider_info(&self) -> ProviderInfo {
            ProviderInfo::new("test", "test-model")
        }
    }

    fn transcript() -> Vec<Turn> {
        let session_id = SessionId::new();
        vec![
            Turn::question(session_id, 1, "Where to?").unwrap(),
            Turn::answer(session_id, "The beach").unwrap(),
        ]
    }

    #[tokio::test]
    async fn parses_well_formed_reply() {
        let provider = FixedProvider {
            content: r#"{"summary": "Loves the coast.", "keyInsights": ["beach person"], "structuredData": {"budget": 2000}}"#.to_string(),
        };

        let parts = SummaryGenerator::new()
            .generate(&provider, "vacation preferences", &transcript())
            .await
            .unwrap();

        assert_eq!(parts.summary, "Loves the coast.");
        assert_eq!(parts.key_insights, vec!["beach person".to_string()]);
        assert_eq!(parts.structured_data.get("budget"), Some(&json!(2000)));
    }

    #[test]
    fn parse_accepts_fenced_json() {
        let content = "```json\n{\"summary\": \"S\", \"keyInsights\": [], \"structuredData\": {}}\n```";
        let parts = parse_summary(content).unwrap();
        assert_eq!(parts.summary, "S");
    }

    #[test]
    fn parse_accepts_surrounding_prose() {
        let content = "Here is the analysis:\n{\"summary\": \"S\"}\nHope this helps!";
        let parts = parse_summary(content).unwrap();
        assert_eq!(parts.summary, "S");
    }

    #[test]
    fn missing_pieces_default_to_empty() {
        let parts = parse_summary(r#"{"summary": "Only prose."}"#).unwrap();
        assert_eq!(parts.summary, "Only prose.");
        assert!(parts.key_insights.is_empty());
        assert!(parts.structured_data.is_empty());
    }

    #[test]
    fn mistyped_pieces_default_to_empty() {
        let parts =
            parse_summary(r#"{"summary": 42, "keyInsights": "not a list", "structuredData": []}"#)
                .unwrap();
        assert!(parts.summary.is_empty());
        assert!(parts.key_insights.is_empty());
        assert!(parts.structured_data.is_empty());
    }

    #[test]
    fn non_string_insights_are_skipped() {
        let parts = parse_summary(r#"{"keyInsights": ["a", 1, "b", null]}"#).unwrap();
        assert_eq!(parts.key_insights, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn reply_without_json_is_malformed() {
        let result = parse_summary("I could not analyze this conversation.");
        assert!(matches!(result, Err(GenerationError::MalformedCompletion(_))));
    }

    #[test]
    fn non_object_json_is_malformed() {
        let result = parse_summary("[1, 2, 3]");
        assert!(matches!(result, Err(GenerationError::MalformedCompletion(_))));
    }
}
