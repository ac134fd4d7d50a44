//! PostgreSQL implementation of InterviewRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, InterviewId, OwnerId, Timestamp};
use crate::domain::interview::{Interview, InterviewStatus, ShareToken};
use crate::ports::InterviewRepository;

/// PostgreSQL implementation of InterviewRepository.
#[derive(Clone)]
pub struct PostgresInterviewRepository {
    pool: PgPool,
}

impl PostgresInterviewRepository {
    /// Creates a new PostgresInterviewRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InterviewRepository for PostgresInterviewRepository {
    async fn save(&self, interview: &Interview) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO interviews (
                id, owner_id, title, prompt, question_budget, share_token, status,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(interview.id().as_uuid())
        .bind(interview.owner_id().as_str())
        .bind(interview.title())
        .bind(interview.prompt())
        .bind(interview.question_budget() as i32)
        .bind(interview.share_token().as_str())
        .bind(interview_status_to_str(interview.status()))
        .bind(interview.created_at().as_datetime())
        .bind(interview.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert interview: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, interview: &Interview) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE interviews SET
                status = $2,
                updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(interview.id().as_uuid())
        .bind(interview_status_to_str(interview.status()))
        .bind(interview.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update interview: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::InterviewNotFound,
                format!("Interview not found: {}", interview.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &InterviewId) -> Result<Option<Interview>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, owner_id, title, prompt, question_budget, share_token, status,
                   created_at, updated_at
            FROM interviews
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch interview: {}", e),
            )
        })?;

        row.map(row_to_interview).transpose()
    }

    async fn find_by_share_token(
        &self,
        token: &ShareToken,
    ) -> Result<Option<Interview>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, owner_id, title, prompt, question_budget, share_token, status,
                   created_at, updated_at
            FROM interviews
            WHERE share_token = $1
            "#,
        )
        .bind(token.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch interview by token: {}", e),
            )
        })?;

        row.map(row_to_interview).transpose()
    }

    async fn find_by_owner(&self, owner_id: &OwnerId) -> Result<Vec<Interview>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, owner_id, title, prompt, question_budget, share_token, status,
                   created_at, updated_at
            FROM interviews
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch interviews by owner: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_interview).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn interview_status_to_str(status: InterviewStatus) -> &'static str {
    match status {
        InterviewStatus::Active => "active",
        InterviewStatus::Archived => "archived",
    }
}

fn str_to_interview_status(s: &str) -> Result<InterviewStatus, DomainError> {
    match s {
        "active" => Ok(InterviewStatus::Active),
        "archived" => Ok(InterviewStatus::Archived),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid interview status: {}", s),
        )),
    }
}

fn row_to_interview(row: sqlx::postgres::PgRow) -> Result<Interview, DomainError> {
    let id: uuid::Uuid = get_column(&row, "id")?;
    let owner_id: String = get_column(&row, "owner_id")?;
    let title: String = get_column(&row, "title")?;
    let prompt: String = get_column(&row, "prompt")?;
    let question_budget: i32 = get_column(&row, "question_budget")?;
    let share_token: String = get_column(&row, "share_token")?;
    let status_str: String = get_column(&row, "status")?;
    let created_at: chrono::DateTime<chrono::Utc> = get_column(&row, "created_at")?;
    let updated_at: chrono::DateTime<chrono::Utc> = get_column(&row, "updated_at")?;

    Ok(Interview::reconstitute(
        InterviewId::from_uuid(id),
        OwnerId::new(owner_id).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid owner_id: {}", e))
        })?,
        title,
        prompt,
        question_budget as u32,
        ShareToken::new(share_token).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid share_token: {}", e))
        })?,
        str_to_interview_status(&status_str)?,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
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
