//! Report aggregate entity.
//!
//! The central persisted record: one per user-initiated report request.
//! Mutated exactly once over its lifetime, by the PENDING -> PAID payment
//! transition.
//!
//! # Invariants
//!
//! - `id` is globally unique and immutable
//! - `brand_name` and `preview_data` are immutable after creation
//! - `access_token` and `full_report` are both present iff status is PAID,
//!   both absent iff PENDING

use crate::domain::foundation::{AccessToken, ReportId, StateMachine, Timestamp};
use serde::{Deserialize, Serialize};

use super::errors::ReportError;
use super::full_report::FullReport;
use super::preview::PreviewData;
use super::status::ReportStatus;

/// Maximum length for a brand name.
pub const MAX_BRAND_NAME_LENGTH: usize = 100;

/// Brand availability report aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Unique identifier for this report.
    id: ReportId,

    /// The probed brand name.
    brand_name: String,

    /// Current lifecycle status.
    status: ReportStatus,

    /// Aggregated probe results, set once at creation.
    preview_data: PreviewData,

    /// Bearer credential for full-report retrieval. PAID only.
    access_token: Option<AccessToken>,

    /// The paid report artifact. PAID only.
    full_report: Option<FullReport>,

    /// When the report was created.
    created_at: Timestamp,

    /// When the report was last updated.
    updated_at: Timestamp,
}

impl Report {
    /// Creates a new PENDING report for a brand name.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the brand name is blank or too long
    pub fn new(
        id: ReportId,
        brand_name: String,
        preview_data: PreviewData,
    ) -> Result<Self, ReportError> {
        Self::validate_brand_name(&brand_name)?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            brand_name,
            status: ReportStatus::Pending,
            preview_data,
            access_token: None,
            full_report: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a report from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ReportId,
        brand_name: String,
        status: ReportStatus,
        preview_data: PreviewData,
        access_token: Option<AccessToken>,
        full_report: Option<FullReport>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            brand_name,
            status,
            preview_data,
            access_token,
            full_report,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the report ID.
    pub fn id(&self) -> &ReportId {
        &self.id
    }

    /// Returns the probed brand name.
    pub fn brand_name(&self) -> &str {
        &self.brand_name
    }

    /// Returns the current status.
    pub fn status(&self) -> ReportStatus {
        self.status
    }

    /// Returns the aggregated preview data.
    pub fn preview_data(&self) -> &PreviewData {
        &self.preview_data
    }

    /// Returns the access token, present only once PAID.
    pub fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    /// Returns the full report, present only once PAID.
    pub fn full_report(&self) -> Option<&FullReport> {
        self.full_report.as_ref()
    }

    /// Returns when the report was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns when the report was last updated.
    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Returns true if the full report may be served.
    pub fn is_paid(&self) -> bool {
        self.status.is_paid()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Applies the payment completion: PENDING -> PAID, minting the token
    /// and full report together so no partial state exists.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if the report is already PAID
    pub fn mark_paid(
        &mut self,
        access_token: AccessToken,
        full_report: FullReport,
    ) -> Result<(), ReportError> {
        self.status = self
            .status
            .transition_to(ReportStatus::Paid)
            .map_err(|e| ReportError::invalid_state(e.to_string()))?;
        self.access_token = Some(access_token);
        self.full_report = Some(full_report);
        self.updated_at = Timestamp::now();
        Ok(())
    }

    fn validate_brand_name(brand_name: &str) -> Result<(), ReportError> {
        if brand_name.trim().is_empty() {
            return Err(ReportError::validation("brandName", "brandName is required"));
        }
        if brand_name.len() > MAX_BRAND_NAME_LENGTH {
            return Err(ReportError::validation(
                "brandName",
                format!("brandName exceeds {} characters", MAX_BRAND_NAME_LENGTH),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::preview::{SocialPresence, SocialStatus, WebsiteStatus};

    fn preview() -> PreviewData {
        PreviewData {
            domain_checks: vec![],
            website: WebsiteStatus::Down,
            social: SocialPresence {
                instagram: SocialStatus::NotFound,
                tiktok: SocialStatus::NotFound,
                x: SocialStatus::NotFound,
            },
        }
    }

    fn pending_report() -> Report {
        Report::new(ReportId::new(), "acme".to_string(), preview()).unwrap()
    }

    #[test]
    fn new_report_is_pending_without_token_or_full_report() {
        let report = pending_report();
        assert_eq!(report.status(), ReportStatus::Pending);
        assert!(report.access_token().is_none());
        assert!(report.full_report().is_none());
    }

    #[test]
    fn blank_brand_name_is_rejected() {
        let err = Report::new(ReportId::new(), "   ".to_string(), preview()).unwrap_err();
        assert!(matches!(err, ReportError::ValidationFailed { .. }));
    }

    #[test]
    fn oversized_brand_name_is_rejected() {
        let name = "a".repeat(MAX_BRAND_NAME_LENGTH + 1);
        assert!(Report::new(ReportId::new(), name, preview()).is_err());
    }

    #[test]
    fn mark_paid_sets_token_and_full_report_together() {
        let mut report = pending_report();
        let token = AccessToken::generate();
        let full = FullReport::from_preview(report.preview_data());

        report.mark_paid(token.clone(), full.clone()).unwrap();

        assert!(report.is_paid());
        assert_eq!(report.access_token(), Some(&token));
        assert_eq!(report.full_report(), Some(&full));
    }

    #[test]
    fn mark_paid_twice_is_rejected() {
        let mut report = pending_report();
        let full = FullReport::from_preview(report.preview_data());
        report
            .mark_paid(AccessToken::generate(), full.clone())
            .unwrap();

        let err = report.mark_paid(AccessToken::generate(), full).unwrap_err();
        assert!(matches!(err, ReportError::InvalidState(_)));
    }
}
