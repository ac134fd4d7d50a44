//! Question generator.
//!
//! Builds the instruction for the next interview question and requires
//! exactly one plain-text question back.

use crate::domain::transcript::Turn;
use crate::ports::{CompletionProvider, CompletionRequest, Message};

use super::{render_transcript, GenerationError};

const MAX_TOKENS: u32 = 2000;
const TEMPERATURE: f32 = 0.7;

/// Generates the next question from the interview goal, the transcript so
/// far, and the position in the sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuestionGenerator;

impl QuestionGenerator {
    /// Creates a new question generator.
    pub fn new() -> Self {
        Self
    }

    /// Generate question `question_number` of `question_budget`.
    ///
    /// The system prompt carries the interview goal and the position in
    /// the sequence so the model can pace itself; the user message carries
    /// the prior conversation so the question can follow up on specifics.
    ///
    /// # Errors
    ///
    /// - `Provider` if the completion call fails
    /// - `EmptyCompletion` if the reply contains no question text
    pub async fn generate(
        &self,
        provider: &dyn CompletionProvider,
        topic_prompt: &str,
        transcript: &[Turn],
        question_number: u32,
        question_budget: u32,
    ) -> Result<String, GenerationError> {
        let system_prompt = format!(
            "You are an expert interviewer conducting an interview based on this prompt: \"{topic_prompt}\".\n\n\
             You are currently on question {question_number} of {question_budget}. Based on the conversation so far, \
             generate the next question that:\n\
             1. Follows naturally from the previous answers\n\
             2. Digs deeper into interesting points mentioned by the respondent\n\
             3. Helps achieve the interview goals\n\
             4. Is open-ended and encourages detailed responses\n\n\
             Return ONLY the question text, nothing else."
        );

        let user_message = if transcript.is_empty() {
            format!(
                "Generate the opening question ({} of {}):",
                question_number, question_budget
            )
        } else {
            format!(
                "Conversation so far:\n\n{}\n\nGenerate the next question ({} of {}):",
                render_transcript(transcript),
                question_number,
                question_budget
            )
        };

        let request = CompletionRequest::new()
            .with_system_prompt(system_prompt)
            .with_message(Message::user(user_message))
            .with_max_tokens(MAX_TOKENS)
            .with_temperature(TEMPERATURE);

        let response = provider.complete(request).await?;

        let question = response.content.trim();
        if question.is_empty() {
            return Err(GenerationError::EmptyCompletion);
        }

        Ok(question.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SessionId;
    use crate::ports::{
        CompletionError, CompletionResponse, FinishReason, ProviderInfo, TokenUsage,
    };
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct CapturingProvider {
        reply: Result<String, CompletionError>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl CapturingProvider {
        fn replying(content: &str) -> Self {
            Self {
                reply: Ok(content.to_string()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing(err: CompletionError) -> Self {
            Self {
                reply: Err(err),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn last_request(&self) -> CompletionRequest {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl CompletionProvider for CapturingProvider {
        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> Result<CompletionResponse, CompletionError> {
            self.requests.lock().unwrap().push(request);
            match &self.reply {
                Ok(content) => Ok(CompletionResponse {
                    content: content.clone(),
                    usage: TokenUsage::zero(),
                    model: "test-model".to_string(),
                    finish_reason: FinishReason::Stop,
                }),
                Err(_) => Err(CompletionError::unavailable("down")),
            }
        }

        fn provider_info(&self) -> ProviderInfo {
            ProviderInfo::new("test", "test-model")
        }
    }

    fn sample_transcript() -> Vec<Turn> {
        let session_id = SessionId::new();
        vec![
            Turn::question(session_id, 1, "Where do you like to travel?").unwrap(),
            Turn::answer(session_id, "I like the beach").unwrap(),
        ]
    }

    #[tokio::test]
    async fn returns_trimmed_question_text() {
        let provider = CapturingProvider::replying("  What draws you to the coast?  \n");
        let question = QuestionGenerator::new()
            .generate(&provider, "vacation preferences", &sample_transcript(), 2, 5)
            .await
            .unwrap();
        assert_eq!(question, "What draws you to the coast?");
    }

    #[tokio::test]
    async fn system_prompt_encodes_goal_and_position() {
        let provider = CapturingProvider::replying("Q?");
        QuestionGenerator::new()
            .generate(&provider, "vacation preferences", &sample_transcript(), 2, 5)
            .await
            .unwrap();

        let request = provider.last_request();
        let system = request.system_prompt.unwrap();
        assert!(system.contains("vacation preferences"));
        assert!(system.contains("question 2 of 5"));
    }

    #[tokio::test]
    async fn user_message_carries_prior_answers() {
        let provider = CapturingProvider::replying("Q?");
        QuestionGenerator::new()
            .generate(&provider, "topic", &sample_transcript(), 2, 5)
            .await
            .unwrap();

        let request = provider.last_request();
        assert!(request.messages[0].content.contains("Respondent: I like the beach"));
    }

    #[tokio::test]
    async fn empty_transcript_requests_opening_question() {
        let provider = CapturingProvider::replying("Q?");
        QuestionGenerator::new()
            .generate(&provider, "topic", &[], 1, 5)
            .await
            .unwrap();

        let request = provider.last_request();
        assert!(request.messages[0].content.contains("opening question"));
    }

    #[tokio::test]
    async fn empty_reply_is_generation_error() {
        let provider = CapturingProvider::replying("   \n ");
        let result = QuestionGenerator::new()
            .generate(&provider, "topic", &[], 1, 5)
            .await;
        assert!(matches!(result, Err(GenerationError::EmptyCompletion)));
    }

    #[tokio::test]
    async fn provider_failure_propagates() {
        let provider = CapturingProvider::failing(CompletionError::unavailable("down"));
        let result = QuestionGenerator::new()
            .generate(&provider, "topic", &[], 1, 5)
            .await;
        assert!(matches!(result, Err(GenerationError::Provider(_))));
    }
}
