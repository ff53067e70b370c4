//! Billing provider port for external payment processing.
//!
//! Defines the contract for the checkout/webhook integration (Stripe-shaped).
//! The core needs exactly two capabilities: create a checkout session tagged
//! with a report id, and authenticate + parse an inbound webhook event.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ReportId;

/// Port for the billing collaborator.
#[async_trait]
pub trait BillingProvider: Send + Sync {
    /// Create a checkout session for a report's full-report purchase.
    ///
    /// The session carries the report id as correlation metadata so the
    /// completion webhook can be routed back to the record.
    async fn create_checkout(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, BillingError>;

    /// Authenticate a raw webhook payload and parse it into a typed event.
    ///
    /// With a signing secret configured, a missing or invalid signature is
    /// an `InvalidWebhook` error. Without one (degraded local mode) the
    /// payload is parsed verbatim.
    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: Option<&str>,
    ) -> Result<WebhookEvent, BillingError>;
}

/// Request to create a checkout session.
#[derive(Debug, Clone)]
pub struct CreateCheckoutRequest {
    /// The report being purchased.
    pub report_id: ReportId,

    /// Brand name shown on the checkout line item.
    pub brand_name: String,
}

/// Checkout session for payment completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider's session ID.
    pub id: String,

    /// URL for the customer to complete checkout.
    pub url: String,
}

/// Webhook event from the billing provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookEvent {
    /// Event ID from the provider.
    pub id: String,

    /// Event type.
    pub event_type: WebhookEventType,

    /// Report id correlation metadata, when the event carries one.
    pub report_id: Option<String>,
}

/// Types of webhook events we handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEventType {
    /// Checkout completed; the one event kind that mutates report state.
    CheckoutSessionCompleted,

    /// Any other event type; acknowledged and ignored.
    Unknown(String),
}

/// Error codes for billing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingErrorCode {
    /// Webhook signature/format verification failed.
    InvalidWebhook,

    /// Network/transport failure talking to the provider.
    NetworkError,

    /// The provider rejected the request.
    ProviderError,
}

/// Billing operation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingError {
    /// Error code for categorization.
    pub code: BillingErrorCode,

    /// Human-readable message.
    pub message: String,
}

impl BillingError {
    /// Create a new billing error.
    pub fn new(code: BillingErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create an invalid webhook error.
    pub fn invalid_webhook(message: impl Into<String>) -> Self {
        Self::new(BillingErrorCode::InvalidWebhook, message)
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(BillingErrorCode::NetworkError, message)
    }

    /// Create a provider error.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(BillingErrorCode::ProviderError, message)
    }
}

impl std::fmt::Display for BillingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for BillingError {}
