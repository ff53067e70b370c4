//! Mock billing provider for testing.
//!
//! Configurable mock implementation of `BillingProvider` for unit and
//! integration tests. Supports pre-configured responses, error injection,
//! and call tracking.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::ports::{
    BillingError, BillingProvider, CheckoutSession, CreateCheckoutRequest, WebhookEvent,
    WebhookEventType,
};

/// Mock billing provider for testing.
///
/// By default, `create_checkout` returns a session derived from the request
/// and `verify_webhook` parses the payload as a pre-built event set with
/// [`set_event`](MockBillingProvider::set_event).
#[derive(Default)]
pub struct MockBillingProvider {
    inner: Mutex<MockState>,
}

#[derive(Default)]
struct MockState {
    /// Next webhook event to return from `verify_webhook`.
    next_event: Option<WebhookEvent>,

    /// Error to return on the next call.
    next_error: Option<BillingError>,

    /// Checkout requests received, for assertions.
    checkout_requests: Vec<CreateCheckoutRequest>,
}

impl MockBillingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the event returned by the next `verify_webhook` call.
    pub fn set_event(&self, event: WebhookEvent) {
        self.inner.lock().unwrap().next_event = Some(event);
    }

    /// Inject an error for the next call.
    pub fn set_error(&self, error: BillingError) {
        self.inner.lock().unwrap().next_error = Some(error);
    }

    /// Checkout requests received so far.
    pub fn checkout_requests(&self) -> Vec<CreateCheckoutRequest> {
        self.inner.lock().unwrap().checkout_requests.clone()
    }
}

#[async_trait]
impl BillingProvider for MockBillingProvider {
    async fn create_checkout(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, BillingError> {
        let mut state = self.inner.lock().unwrap();
        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        let session = CheckoutSession {
            id: format!("cs_mock_{}", state.checkout_requests.len()),
            url: format!("https://checkout.mock/{}", request.report_id),
        };
        state.checkout_requests.push(request);
        Ok(session)
    }

    async fn verify_webhook(
        &self,
        payload: &[u8],
        _signature: Option<&str>,
    ) -> Result<WebhookEvent, BillingError> {
        let mut state = self.inner.lock().unwrap();
        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        if let Some(event) = state.next_event.clone() {
            return Ok(event);
        }

        // Fall back to a minimal parse so tests can drive the mock with
        // real-shaped payloads.
        let value: serde_json::Value = serde_json::from_slice(payload)
            .map_err(|e| BillingError::invalid_webhook(format!("Invalid JSON: {}", e)))?;
        let event_type = match value["type"].as_str() {
            Some("checkout.session.completed") => WebhookEventType::CheckoutSessionCompleted,
            Some(other) => WebhookEventType::Unknown(other.to_string()),
            None => return Err(BillingError::invalid_webhook("Missing event type")),
        };
        Ok(WebhookEvent {
            id: value["id"].as_str().unwrap_or("evt_mock").to_string(),
            event_type,
            report_id: value["data"]["object"]["metadata"]["report_id"]
                .as_str()
                .map(String::from),
        })
    }
}
