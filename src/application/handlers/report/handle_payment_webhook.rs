//! HandlePaymentWebhookHandler - idempotent payment completion processing.
//!
//! The delivery channel is at-least-once: the same event may arrive twice,
//! possibly concurrently. The handler therefore treats "already paid" as
//! success and delegates the PENDING -> PAID write to the store's atomic
//! conditional update, which resolves duplicate races to exactly one
//! transition.

use std::sync::Arc;

use crate::domain::foundation::{AccessToken, ReportId};
use crate::domain::report::{FullReport, ReportError};
use crate::ports::{BillingProvider, PaymentOutcome, ReportStore, WebhookEventType};

/// Command to process an inbound payment webhook.
#[derive(Debug, Clone)]
pub struct HandlePaymentWebhookCommand {
    /// Raw webhook payload bytes.
    pub payload: Vec<u8>,

    /// Signature header, absent when the sender provided none.
    pub signature: Option<String>,
}

/// Result of webhook processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlePaymentWebhookResult {
    /// Checkout completed; the report transitioned to PAID.
    ReportUnlocked { report_id: ReportId },

    /// The report was already PAID; redelivery acknowledged, nothing mutated.
    AlreadyProcessed { report_id: ReportId },

    /// Event type carries no state change; acknowledged and ignored.
    Ignored,
}

/// Handler for payment completion webhooks.
pub struct HandlePaymentWebhookHandler {
    store: Arc<dyn ReportStore>,
    billing: Arc<dyn BillingProvider>,
}

impl HandlePaymentWebhookHandler {
    pub fn new(store: Arc<dyn ReportStore>, billing: Arc<dyn BillingProvider>) -> Self {
        Self { store, billing }
    }

    pub async fn handle(
        &self,
        cmd: HandlePaymentWebhookCommand,
    ) -> Result<HandlePaymentWebhookResult, ReportError> {
        // 1. Authenticate and parse the event. Rejection never mutates state.
        let event = self
            .billing
            .verify_webhook(&cmd.payload, cmd.signature.as_deref())
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Webhook rejected");
                ReportError::invalid_signature(e.to_string())
            })?;

        // 2. Only checkout completion mutates state.
        match event.event_type {
            WebhookEventType::CheckoutSessionCompleted => {}
            WebhookEventType::Unknown(kind) => {
                tracing::debug!(event_id = %event.id, kind, "Ignoring webhook event");
                return Ok(HandlePaymentWebhookResult::Ignored);
            }
        }

        // 3. Route by the correlation id embedded at checkout creation.
        let report_id: ReportId = event
            .report_id
            .as_deref()
            .ok_or_else(|| ReportError::malformed_event("Missing report_id in metadata"))?
            .parse()
            .map_err(|_| ReportError::malformed_event("Invalid report_id in metadata"))?;

        let report = self
            .store
            .find_by_id(&report_id)
            .await?
            .ok_or(ReportError::NotFound(report_id))?;

        // 4. Idempotency short-circuit: redelivery of a processed event.
        if report.is_paid() {
            tracing::info!(report_id = %report_id, "Report already processed");
            return Ok(HandlePaymentWebhookResult::AlreadyProcessed { report_id });
        }

        // 5. Synthesize the artifact and apply the one atomic transition.
        let full_report = FullReport::from_preview(report.preview_data());
        let access_token = AccessToken::generate();

        match self
            .store
            .complete_payment(&report_id, &access_token, &full_report)
            .await?
        {
            PaymentOutcome::Completed => {
                tracing::info!(report_id = %report_id, "Report unlocked");
                Ok(HandlePaymentWebhookResult::ReportUnlocked { report_id })
            }
            // Lost a duplicate-delivery race; the winner's token stands.
            PaymentOutcome::AlreadyPaid => {
                tracing::info!(report_id = %report_id, "Report already processed");
                Ok(HandlePaymentWebhookResult::AlreadyProcessed { report_id })
            }
            PaymentOutcome::NotFound => Err(ReportError::NotFound(report_id)),
        }
    }
}
