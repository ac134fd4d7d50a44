//! Generation module - prompt assembly and output parsing for the
//! completion service.
//!
//! Two generators share a contract style: build the instruction and
//! conversation for the provider, then parse its reply defensively. The
//! provider's output shape is a versioned contract at this boundary; an
//! unusable reply surfaces as `GenerationError`, never as a panic or a
//! silently corrupted value.

mod errors;
mod question;
mod summary;

pub use errors::GenerationError;
pub use question::QuestionGenerator;
pub use summary::{SummaryGenerator, SummaryParts};

use crate::domain::transcript::{Turn, TurnRole};

/// Renders the transcript as speaker-labeled lines for prompt context.
pub(crate) fn render_transcript(turns: &[Turn]) -> String {
    turns
        .iter()
        .map(|turn| {
            let speaker = match turn.role() {
                TurnRole::Interviewer => "Interviewer",
                TurnRole::Respondent => "Respondent",
            };
            format!("{}: {}", speaker, turn.content())
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SessionId;

    #[test]
    fn render_transcript_labels_speakers() {
        let session_id = SessionId::new();
        let turns = vec![
            Turn::question(session_id, 1, "Where do you like to travel?").unwrap(),
            Turn::answer(session_id, "I like the beach").unwrap(),
        ];

        let text = render_transcript(&turns);
        assert_eq!(
            text,
            "Interviewer: Where do you like to travel?\n\nRespondent: I like the beach"
        );
    }

    #[test]
    fn render_transcript_of_empty_slice_is_empty() {
        assert_eq!(render_transcript(&[]), "");
    }
}
