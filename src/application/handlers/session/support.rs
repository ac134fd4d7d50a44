//! In-memory fakes shared by the session handler tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::foundation::{
    DomainError, ErrorCode, EventEnvelope, InterviewId, OwnerId, SessionId,
};
use crate::domain::interview::{Interview, ShareToken};
use crate::domain::session::{Session, SessionSummary};
use crate::domain::transcript::Turn;
use crate::ports::{
    CompletionError, CompletionProvider, CompletionRequest, CompletionResponse, EventPublisher,
    FinishReason, InterviewRepository, ProviderInfo, ProviderResolver, SessionRepository,
    SummaryRepository, TokenUsage, TranscriptStore,
};

// ════════════════════════════════════════════════════════════════════════════
// Repositories
// ════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub(crate) struct InMemoryInterviews {
    items: Mutex<HashMap<InterviewId, Interview>>,
}

impl InMemoryInterviews {
    pub(crate) fn with(interviews: Vec<Interview>) -> Self {
        let repo = Self::default();
        {
            let mut items = repo.items.lock().unwrap();
            for interview in interviews {
                items.insert(*interview.id(), interview);
            }
        }
        repo
    }
}

#[async_trait]
impl InterviewRepository for InMemoryInterviews {
    async fn save(&self, interview: &Interview) -> Result<(), DomainError> {
        self.items
            .lock()
            .unwrap()
            .insert(*interview.id(), interview.clone());
        Ok(())
    }

    async fn update(&self, interview: &Interview) -> Result<(), DomainError> {
        self.save(interview).await
    }

    async fn find_by_id(&self, id: &InterviewId) -> Result<Option<Interview>, DomainError> {
        Ok(self.items.lock().unwrap().get(id).cloned())
    }

    async fn find_by_share_token(
        &self,
        token: &ShareToken,
    ) -> Result<Option<Interview>, DomainError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .values()
            .find(|i| i.share_token() == token)
            .cloned())
    }

    async fn find_by_owner(&self, owner: &OwnerId) -> Result<Vec<Interview>, DomainError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .values()
            .filter(|i| i.owner_id() == owner)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub(crate) struct InMemorySessions {
    items: Mutex<HashMap<SessionId, Session>>,
    conflict_next_update: AtomicBool,
}

impl InMemorySessions {
    /// Force the next `update` call to lose the compare-and-swap.
    pub(crate) fn conflict_on_next_update(&self) {
        self.conflict_next_update.store(true, Ordering::SeqCst);
    }

    pub(crate) fn get(&self, id: &SessionId) -> Option<Session> {
        self.items.lock().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessions {
    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        self.items
            .lock()
            .unwrap()
            .insert(*session.id(), session.clone());
        Ok(())
    }

    async fn update(&self, session: &Session, expected_version: u64) -> Result<(), DomainError> {
        if self.conflict_next_update.swap(false, Ordering::SeqCst) {
            return Err(DomainError::new(ErrorCode::Conflict, "forced conflict"));
        }

        let mut items = self.items.lock().unwrap();
        let stored = items.get(session.id()).ok_or_else(|| {
            DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", session.id()),
            )
        })?;

        if stored.version() != expected_version {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                "stale session version",
            ));
        }

        items.insert(*session.id(), session.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        Ok(self.items.lock().unwrap().get(id).cloned())
    }

    async fn find_by_interview(
        &self,
        interview_id: &InterviewId,
    ) -> Result<Vec<Session>, DomainError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.interview_id() == interview_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryTranscript {
    turns: Mutex<Vec<Turn>>,
}

impl InMemoryTranscript {
    pub(crate) fn turns_for(&self, session_id: &SessionId) -> Vec<Turn> {
        self.turns
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.session_id() == session_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl TranscriptStore for InMemoryTranscript {
    async fn append(&self, turn: &Turn) -> Result<(), DomainError> {
        self.turns.lock().unwrap().push(turn.clone());
        Ok(())
    }

    async fn list_turns(&self, session_id: &SessionId) -> Result<Vec<Turn>, DomainError> {
        Ok(self.turns_for(session_id))
    }
}

#[derive(Default)]
pub(crate) struct InMemorySummaries {
    items: Mutex<HashMap<SessionId, SessionSummary>>,
}

impl InMemorySummaries {
    pub(crate) fn get(&self, session_id: &SessionId) -> Option<SessionSummary> {
        self.items.lock().unwrap().get(session_id).cloned()
    }
}

#[async_trait]
impl SummaryRepository for InMemorySummaries {
    async fn save(&self, summary: &SessionSummary) -> Result<(), DomainError> {
        let mut items = self.items.lock().unwrap();
        if items.contains_key(summary.session_id()) {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                "session already has a summary",
            ));
        }
        items.insert(*summary.session_id(), summary.clone());
        Ok(())
    }

    async fn find_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<SessionSummary>, DomainError> {
        Ok(self.items.lock().unwrap().get(session_id).cloned())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Events and completion
// ════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub(crate) struct RecordingPublisher {
    events: Mutex<Vec<EventEnvelope>>,
}

impl RecordingPublisher {
    pub(crate) fn published(&self) -> Vec<EventEnvelope> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }

    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        self.events.lock().unwrap().extend(events);
        Ok(())
    }
}

/// Completion provider that pops scripted replies in order.
#[derive(Default)]
pub(crate) struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<String, CompletionError>>>,
}

impl ScriptedProvider {
    pub(crate) fn push_reply(&self, reply: &str) {
        self.replies.lock().unwrap().push_back(Ok(reply.to_string()));
    }

    pub(crate) fn push_error(&self, err: CompletionError) {
        self.replies.lock().unwrap().push_back(Err(err));
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(
        &self,
        _request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(content)) => Ok(CompletionResponse {
                content,
                usage: TokenUsage::zero(),
                model: "scripted".to_string(),
                finish_reason: FinishReason::Stop,
            }),
            Some(Err(err)) => Err(err),
            None => Err(CompletionError::unavailable("script exhausted")),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("scripted", "scripted")
    }
}

/// Resolver that hands every owner the same provider.
pub(crate) struct StaticResolver {
    provider: Arc<dyn CompletionProvider>,
}

impl StaticResolver {
    pub(crate) fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl ProviderResolver for StaticResolver {
    async fn resolve(
        &self,
        _owner_id: &OwnerId,
    ) -> Result<Arc<dyn CompletionProvider>, DomainError> {
        Ok(self.provider.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Fixtures
// ════════════════════════════════════════════════════════════════════════════

pub(crate) fn test_owner() -> OwnerId {
    OwnerId::new("operator-1").unwrap()
}

pub(crate) fn test_interview(question_budget: u32) -> Interview {
    Interview::new(
        test_owner(),
        "Vacation preferences".to_string(),
        "Learn how this person likes to travel".to_string(),
        question_budget,
    )
    .unwrap()
}

pub(crate) const SUMMARY_JSON: &str = r#"{"summary": "Beach person.", "keyInsights": ["prefers warm weather"], "structuredData": {"budget": 2000}}"#;
