//! Report store port for durable report persistence.
//!
//! The store is an external collaborator; the core requires create,
//! find-by-id, find-by-token, and one atomic conditional update with
//! read-after-write consistency on the fields it touches.

use async_trait::async_trait;

use crate::domain::foundation::{AccessToken, DomainError, ReportId};
use crate::domain::report::{FullReport, Report};

/// Outcome of the conditional PENDING -> PAID update.
///
/// Payment events are delivered at-least-once, possibly concurrently, so
/// the store reports which of the three states the record was actually in
/// rather than assuming the caller's read is still current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// The record was PENDING and is now PAID.
    Completed,

    /// The record was already PAID; nothing was written.
    AlreadyPaid,

    /// No record exists for the id.
    NotFound,
}

/// Port for report persistence.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Persist a newly created report.
    async fn create(&self, report: &Report) -> Result<(), DomainError>;

    /// Find a report by its id.
    async fn find_by_id(&self, id: &ReportId) -> Result<Option<Report>, DomainError>;

    /// Find a report by its access token. The only lookup path for
    /// full-report retrieval.
    async fn find_by_access_token(&self, token: &str) -> Result<Option<Report>, DomainError>;

    /// Atomically transition a report to PAID, setting the access token and
    /// full report in the same write, iff the record is still PENDING.
    ///
    /// Implementations must guarantee that two concurrent calls for the same
    /// id resolve to exactly one `Completed`; the loser observes
    /// `AlreadyPaid`. Partial application (token set but status PENDING)
    /// must never be observable.
    async fn complete_payment(
        &self,
        id: &ReportId,
        access_token: &AccessToken,
        full_report: &FullReport,
    ) -> Result<PaymentOutcome, DomainError>;
}
