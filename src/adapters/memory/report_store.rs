//! In-memory implementation of ReportStore.
//!
//! Backs local development and tests. The conditional PENDING -> PAID
//! update runs entirely under one mutex guard, giving the same
//! exactly-one-transition guarantee as the PostgreSQL store.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{AccessToken, DomainError, ReportId};
use crate::domain::report::{FullReport, Report};
use crate::ports::{PaymentOutcome, ReportStore};

/// In-memory ReportStore.
#[derive(Default)]
pub struct InMemoryReportStore {
    reports: Mutex<HashMap<ReportId, Report>>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored reports.
    pub fn len(&self) -> usize {
        self.reports.lock().unwrap().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ReportStore for InMemoryReportStore {
    async fn create(&self, report: &Report) -> Result<(), DomainError> {
        self.reports
            .lock()
            .unwrap()
            .insert(*report.id(), report.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ReportId) -> Result<Option<Report>, DomainError> {
        Ok(self.reports.lock().unwrap().get(id).cloned())
    }

    async fn find_by_access_token(&self, token: &str) -> Result<Option<Report>, DomainError> {
        Ok(self
            .reports
            .lock()
            .unwrap()
            .values()
            .find(|r| r.access_token().map(|t| t.as_str()) == Some(token))
            .cloned())
    }

    async fn complete_payment(
        &self,
        id: &ReportId,
        access_token: &AccessToken,
        full_report: &FullReport,
    ) -> Result<PaymentOutcome, DomainError> {
        let mut reports = self.reports.lock().unwrap();
        match reports.get_mut(id) {
            None => Ok(PaymentOutcome::NotFound),
            Some(report) if report.is_paid() => Ok(PaymentOutcome::AlreadyPaid),
            Some(report) => {
                report
                    .mark_paid(access_token.clone(), full_report.clone())
                    .expect("status checked under the same guard");
                Ok(PaymentOutcome::Completed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::{PreviewData, SocialPresence, SocialStatus, WebsiteStatus};

    fn pending_report() -> Report {
        let preview = PreviewData {
            domain_checks: vec![],
            website: WebsiteStatus::Down,
            social: SocialPresence {
                instagram: SocialStatus::NotFound,
                tiktok: SocialStatus::NotFound,
                x: SocialStatus::NotFound,
            },
        };
        Report::new(ReportId::new(), "acme".to_string(), preview).unwrap()
    }

    #[tokio::test]
    async fn create_then_find_by_id_roundtrips() {
        let store = InMemoryReportStore::new();
        let report = pending_report();

        store.create(&report).await.unwrap();

        let found = store.find_by_id(report.id()).await.unwrap().unwrap();
        assert_eq!(found, report);
    }

    #[tokio::test]
    async fn complete_payment_transitions_exactly_once() {
        let store = InMemoryReportStore::new();
        let report = pending_report();
        let id = *report.id();
        store.create(&report).await.unwrap();

        let full = FullReport::from_preview(report.preview_data());
        let first = store
            .complete_payment(&id, &AccessToken::generate(), &full)
            .await
            .unwrap();
        let second = store
            .complete_payment(&id, &AccessToken::generate(), &full)
            .await
            .unwrap();

        assert_eq!(first, PaymentOutcome::Completed);
        assert_eq!(second, PaymentOutcome::AlreadyPaid);
    }

    #[tokio::test]
    async fn concurrent_completion_yields_one_winner() {
        let store = std::sync::Arc::new(InMemoryReportStore::new());
        let report = pending_report();
        let id = *report.id();
        store.create(&report).await.unwrap();
        let full = FullReport::from_preview(report.preview_data());

        let token_a = AccessToken::generate();
        let token_b = AccessToken::generate();
        let (a, b) = tokio::join!(
            store.complete_payment(&id, &token_a, &full),
            store.complete_payment(&id, &token_b, &full),
        );

        let outcomes = [a.unwrap(), b.unwrap()];
        assert_eq!(
            outcomes
                .iter()
                .filter(|o| **o == PaymentOutcome::Completed)
                .count(),
            1
        );

        // The winner's token is the one that stands.
        let stored = store.find_by_id(&id).await.unwrap().unwrap();
        let token = stored.access_token().unwrap().as_str().to_string();
        let by_token = store.find_by_access_token(&token).await.unwrap();
        assert!(by_token.is_some());
    }

    #[tokio::test]
    async fn unknown_id_completion_is_not_found() {
        let store = InMemoryReportStore::new();
        let report = pending_report();
        let outcome = store
            .complete_payment(
                report.id(),
                &AccessToken::generate(),
                &FullReport::from_preview(report.preview_data()),
            )
            .await
            .unwrap();
        assert_eq!(outcome, PaymentOutcome::NotFound);
    }

    #[tokio::test]
    async fn find_by_access_token_misses_pending_reports() {
        let store = InMemoryReportStore::new();
        let report = pending_report();
        store.create(&report).await.unwrap();

        assert!(store
            .find_by_access_token("anything")
            .await
            .unwrap()
            .is_none());
    }
}
