//! PostgreSQL implementation of SessionRepository.
//!
//! The update carries the caller's expected version in the WHERE clause;
//! a vanished row is distinguished from a stale version with a follow-up
//! existence check so callers see `Conflict` only for real races.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, InterviewId, SessionId, Timestamp};
use crate::domain::session::{RespondentInfo, Session, SessionStatus};
use crate::ports::SessionRepository;

/// PostgreSQL implementation of SessionRepository.
#[derive(Clone)]
pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    /// Creates a new PostgresSessionRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, id: &SessionId) -> Result<bool, DomainError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sessions WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to check session existence: {}", e),
                )
            })?;

        Ok(result.0 > 0)
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        let respondent = session
            .respondent()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to serialize respondent: {}", e),
                )
            })?;

        sqlx::query(
            r#"
            INSERT INTO sessions (
                id, interview_id, status, questions_asked, respondent,
                started_at, completed_at, version
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.interview_id().as_uuid())
        .bind(session_status_to_str(session.status()))
        .bind(session.questions_asked() as i32)
        .bind(respondent)
        .bind(session.started_at().as_datetime())
        .bind(session.completed_at().map(|ts| *ts.as_datetime()))
        .bind(session.version() as i64)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert session: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, session: &Session, expected_version: u64) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE sessions SET
                status = $2,
                questions_asked = $3,
                completed_at = $4,
                version = $5
            WHERE id = $1 AND version = $6
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session_status_to_str(session.status()))
        .bind(session.questions_asked() as i32)
        .bind(session.completed_at().map(|ts| *ts.as_datetime()))
        .bind(session.version() as i64)
        .bind(expected_version as i64)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update session: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            if self.exists(session.id()).await? {
                return Err(DomainError::new(
                    ErrorCode::Conflict,
                    format!("Session {} was modified concurrently", session.id()),
                ));
            }
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", session.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, interview_id, status, questions_asked, respondent,
                   started_at, completed_at, version
            FROM sessions
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch session: {}", e),
            )
        })?;

        row.map(row_to_session).transpose()
    }

    async fn find_by_interview(
        &self,
        interview_id: &InterviewId,
    ) -> Result<Vec<Session>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, interview_id, status, questions_asked, respondent,
                   started_at, completed_at, version
            FROM sessions
            WHERE interview_id = $1
            ORDER BY started_at DESC
            "#,
        )
        .bind(interview_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch sessions by interview: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_session).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn session_status_to_str(status: SessionStatus) -> &'static str {
    match status {
        SessionStatus::InProgress => "in_progress",
        SessionStatus::Completed => "completed",
        SessionStatus::Abandoned => "abandoned",
    }
}

fn str_to_session_status(s: &str) -> Result<SessionStatus, DomainError> {
    match s {
        "in_progress" => Ok(SessionStatus::InProgress),
        "completed" => Ok(SessionStatus::Completed),
        "abandoned" => Ok(SessionStatus::Abandoned),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid session status: {}", s),
        )),
    }
}

fn row_to_session(row: sqlx::postgres::PgRow) -> Result<Session, DomainError> {
    let id: uuid::Uuid = get_column(&row, "id")?;
    let interview_id: uuid::Uuid = get_column(&row, "interview_id")?;
    let status_str: String = get_column(&row, "status")?;
    let questions_asked: i32 = get_column(&row, "questions_asked")?;
    let respondent: Option<serde_json::Value> = get_column(&row, "respondent")?;
    let started_at: chrono::DateTime<chrono::Utc> = get_column(&row, "started_at")?;
    let completed_at: Option<chrono::DateTime<chrono::Utc>> = get_column(&row, "completed_at")?;
    let version: i64 = get_column(&row, "version")?;

    let respondent: Option<RespondentInfo> = respondent
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid respondent payload: {}", e),
            )
        })?;

    Ok(Session::reconstitute(
        SessionId::from_uuid(id),
        InterviewId::from_uuid(interview_id),
        str_to_session_status(&status_str)?,
        questions_asked as u32,
        respondent,
        Timestamp::from_datetime(started_at),
        completed_at.map(Timestamp::from_datetime),
        version as u64,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_status_conversion_roundtrips() {
        for status in [
            SessionStatus::InProgress,
            SessionStatus::Completed,
            SessionStatus::Abandoned,
        ] {
            assert_eq!(
                str_to_session_status(session_status_to_str(status)).unwrap(),
                status
            );
        }
    }

    #[test]
    fn str_to_session_status_rejects_invalid() {
        assert!(str_to_session_status("paused").is_err());
    }
}
