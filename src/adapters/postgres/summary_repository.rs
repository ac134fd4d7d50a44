//! PostgreSQL implementation of SummaryRepository.
//!
//! The unique constraint on session_id enforces write-once at the
//! storage layer; a duplicate insert surfaces as `Conflict`.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, InterviewId, SessionId, SummaryId, Timestamp};
use crate::domain::session::SessionSummary;
use crate::ports::SummaryRepository;

/// PostgreSQL implementation of SummaryRepository.
#[derive(Clone)]
pub struct PostgresSummaryRepository {
    pool: PgPool,
}

impl PostgresSummaryRepository {
    /// Creates a new PostgresSummaryRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SummaryRepository for PostgresSummaryRepository {
    async fn save(&self, summary: &SessionSummary) -> Result<(), DomainError> {
        let key_insights = serde_json::to_value(summary.key_insights()).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to serialize key insights: {}", e),
            )
        })?;
        let structured_data = serde_json::Value::Object(summary.structured_data().clone());

        sqlx::query(
            r#"
            INSERT INTO summaries (
                id, session_id, interview_id, summary, key_insights, structured_data, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(summary.id().as_uuid())
        .bind(summary.session_id().as_uuid())
        .bind(summary.interview_id().as_uuid())
        .bind(summary.summary())
        .bind(key_insights)
        .bind(structured_data)
        .bind(summary.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                DomainError::new(
                    ErrorCode::Conflict,
                    format!("Session {} already has a summary", summary.session_id()),
                )
            } else {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to insert summary: {}", e),
                )
            }
        })?;

        Ok(())
    }

    async fn find_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<SessionSummary>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, session_id, interview_id, summary, key_insights, structured_data, created_at
            FROM summaries
            WHERE session_id = $1
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch summary: {}", e),
            )
        })?;

        row.map(row_to_summary).transpose()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn row_to_summary(row: sqlx::postgres::PgRow) -> Result<SessionSummary, DomainError> {
    let id: uuid::Uuid = get_column(&row, "id")?;
    let session_id: uuid::Uuid = get_column(&row, "session_id")?;
    let interview_id: uuid::Uuid = get_column(&row, "interview_id")?;
    let summary: String = get_column(&row, "summary")?;
    let key_insights: serde_json::Value = get_column(&row, "key_insights")?;
    let structured_data: serde_json::Value = get_column(&row, "structured_data")?;
    let created_at: chrono::DateTime<chrono::Utc> = get_column(&row, "created_at")?;

    let key_insights: Vec<String> = serde_json::from_value(key_insights).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid key_insights payload: {}", e),
        )
    })?;

    let structured_data = structured_data
        .as_object()
        .cloned()
        .unwrap_or_default();

    Ok(SessionSummary::reconstitute(
        SummaryId::from_uuid(id),
        SessionId::from_uuid(session_id),
        InterviewId::from_uuid(interview_id),
        summary,
        key_insights,
        structured_data,
        Timestamp::from_datetime(created_at),
    ))
}

fn get_column<'r, T>(row: &'r sqlx::postgres::PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get {}: {}", name, e),
        )
    })
}
