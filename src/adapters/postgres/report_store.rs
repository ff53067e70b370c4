//! PostgreSQL implementation of ReportStore.
//!
//! Persists Report aggregates to PostgreSQL. The PENDING -> PAID transition
//! is a single conditional UPDATE guarded on the current status, which is
//! the store-level atomicity the payment webhook relies on under duplicate
//! delivery.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{AccessToken, DomainError, ErrorCode, ReportId, Timestamp};
use crate::domain::report::{FullReport, PreviewData, Report, ReportStatus};
use crate::ports::{PaymentOutcome, ReportStore};

/// PostgreSQL implementation of ReportStore.
#[derive(Clone)]
pub struct PostgresReportStore {
    pool: PgPool,
}

impl PostgresReportStore {
    /// Creates a new PostgresReportStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportStore for PostgresReportStore {
    async fn create(&self, report: &Report) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO reports (
                id, brand_name, status, preview_data, access_token, full_report,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(report.id().as_uuid())
        .bind(report.brand_name())
        .bind(report_status_to_str(report.status()))
        .bind(Json(report.preview_data()))
        .bind(report.access_token().map(|t| t.as_str()))
        .bind(report.full_report().map(Json))
        .bind(report.created_at().as_datetime())
        .bind(report.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert report: {}", e),
            )
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &ReportId) -> Result<Option<Report>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, brand_name, status, preview_data, access_token, full_report,
                   created_at, updated_at
            FROM reports
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to query report: {}", e),
            )
        })?;

        row.map(row_to_report).transpose()
    }

    async fn find_by_access_token(&self, token: &str) -> Result<Option<Report>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, brand_name, status, preview_data, access_token, full_report,
                   created_at, updated_at
            FROM reports
            WHERE access_token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to query report by token: {}", e),
            )
        })?;

        row.map(row_to_report).transpose()
    }

    async fn complete_payment(
        &self,
        id: &ReportId,
        access_token: &AccessToken,
        full_report: &FullReport,
    ) -> Result<PaymentOutcome, DomainError> {
        // Conditional update: only a PENDING row is written, so concurrent
        // duplicates resolve to exactly one transition.
        let result = sqlx::query(
            r#"
            UPDATE reports SET
                status = $2,
                access_token = $3,
                full_report = $4,
                updated_at = $5
            WHERE id = $1 AND status = $6
            "#,
        )
        .bind(id.as_uuid())
        .bind(report_status_to_str(ReportStatus::Paid))
        .bind(access_token.as_str())
        .bind(Json(full_report))
        .bind(Timestamp::now().as_datetime())
        .bind(report_status_to_str(ReportStatus::Pending))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update report: {}", e),
            )
        })?;

        if result.rows_affected() == 1 {
            return Ok(PaymentOutcome::Completed);
        }

        // No row changed: either the record is gone or it was already PAID.
        let status: Option<String> = sqlx::query_scalar(
            r#"SELECT status FROM reports WHERE id = $1"#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to check report status: {}", e),
            )
        })?;

        match status {
            Some(_) => Ok(PaymentOutcome::AlreadyPaid),
            None => Ok(PaymentOutcome::NotFound),
        }
    }
}

fn row_to_report(row: sqlx::postgres::PgRow) -> Result<Report, DomainError> {
    let map_err = |e: sqlx::Error| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to read report row: {}", e),
        )
    };

    let id: uuid::Uuid = row.try_get("id").map_err(map_err)?;
    let brand_name: String = row.try_get("brand_name").map_err(map_err)?;
    let status: String = row.try_get("status").map_err(map_err)?;
    let preview_data: Json<PreviewData> = row.try_get("preview_data").map_err(map_err)?;
    let access_token: Option<String> = row.try_get("access_token").map_err(map_err)?;
    let full_report: Option<Json<FullReport>> = row.try_get("full_report").map_err(map_err)?;
    let created_at: chrono::DateTime<chrono::Utc> = row.try_get("created_at").map_err(map_err)?;
    let updated_at: chrono::DateTime<chrono::Utc> = row.try_get("updated_at").map_err(map_err)?;

    Ok(Report::reconstitute(
        ReportId::from_uuid(id),
        brand_name,
        report_status_from_str(&status)?,
        preview_data.0,
        access_token.map(AccessToken::from_string),
        full_report.map(|j| j.0),
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}

fn report_status_to_str(status: ReportStatus) -> &'static str {
    match status {
        ReportStatus::Pending => "PENDING",
        ReportStatus::Paid => "PAID",
    }
}

fn report_status_from_str(status: &str) -> Result<ReportStatus, DomainError> {
    match status {
        "PENDING" => Ok(ReportStatus::Pending),
        "PAID" => Ok(ReportStatus::Paid),
        other => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Unknown report status in database: {}", other),
        )),
    }
}
