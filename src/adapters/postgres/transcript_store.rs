//! PostgreSQL implementation of TranscriptStore.
//!
//! Turns are ordered by the `seq` column, assigned at insert time;
//! nothing here ever updates or deletes a row.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, SessionId, Timestamp, TurnId};
use crate::domain::transcript::{Turn, TurnRole};
use crate::ports::TranscriptStore;

/// PostgreSQL implementation of TranscriptStore.
#[derive(Clone)]
pub struct PostgresTranscriptStore {
    pool: PgPool,
}

impl PostgresTranscriptStore {
    /// Creates a new PostgresTranscriptStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TranscriptStore for PostgresTranscriptStore {
    async fn append(&self, turn: &Turn) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO turns (id, session_id, role, content, question_number, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(turn.id().as_uuid())
        .bind(turn.session_id().as_uuid())
        .bind(turn_role_to_str(turn.role()))
        .bind(turn.content())
        .bind(turn.question_number().map(|n| n as i32))
        .bind(turn.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to append turn: {}", e),
            )
        })?;

        Ok(())
    }

    async fn list_turns(&self, session_id: &SessionId) -> Result<Vec<Turn>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, session_id, role, content, question_number, created_at
            FROM turns
            WHERE session_id = $1
            ORDER BY seq
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch turns: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_turn).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn turn_role_to_str(role: TurnRole) -> &'static str {
    match role {
        TurnRole::Interviewer => "interviewer",
        TurnRole::Respondent => "respondent",
    }
}

fn str_to_turn_role(s: &str) -> Result<TurnRole, DomainError> {
    match s {
        "interviewer" => Ok(TurnRole::Interviewer),
        "respondent" => Ok(TurnRole::Respondent),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid turn role: {}", s),
        )),
    }
}

fn row_to_turn(row: sqlx::postgres::PgRow) -> Result<Turn, DomainError> {
    let id: uuid::Uuid = get_column(&row, "id")?;
    let session_id: uuid::Uuid = get_column(&row, "session_id")?;
    let role_str: String = get_column(&row, "role")?;
    let content: String = get_column(&row, "content")?;
    let question_number: Option<i32> = get_column(&row, "question_number")?;
    let created_at: chrono::DateTime<chrono::Utc> = get_column(&row, "created_at")?;

    Ok(Turn::reconstitute(
        TurnId::from_uuid(id),
        SessionId::from_uuid(session_id),
        str_to_turn_role(&role_str)?,
        content,
        question_number.map(|n| n as u32),
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
