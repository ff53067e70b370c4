//! GetFullReportHandler - token-gated full report retrieval.

use std::sync::Arc;

use crate::domain::report::{FullReport, ReportError};
use crate::ports::ReportStore;

/// Query for a paid full report.
#[derive(Debug, Clone)]
pub struct GetFullReportQuery {
    pub access_token: String,
}

/// Handler for full report retrieval.
///
/// Lookup is by access token only; the report id is not a secret and never
/// grants access to the paid artifact.
pub struct GetFullReportHandler {
    store: Arc<dyn ReportStore>,
}

impl GetFullReportHandler {
    pub fn new(store: Arc<dyn ReportStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetFullReportQuery) -> Result<FullReport, ReportError> {
        let token = query.access_token.trim();
        if token.is_empty() {
            return Err(ReportError::validation(
                "accessToken",
                "access token is required",
            ));
        }

        let report = self
            .store
            .find_by_access_token(token)
            .await?
            .ok_or(ReportError::TokenNotFound)?;

        // Unreachable under the aggregate invariant; checked anyway so a
        // token leaked out of a partial write can never serve content.
        if !report.is_paid() {
            return Err(ReportError::NotPaid);
        }

        report
            .full_report()
            .cloned()
            .ok_or_else(|| ReportError::infrastructure("PAID report has no full report"))
    }
}
