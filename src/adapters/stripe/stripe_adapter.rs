//! Stripe billing provider adapter.
//!
//! Implements the `BillingProvider` trait against the Stripe REST API:
//! checkout session creation and webhook signature verification.
//!
//! # Security
//!
//! - HMAC-SHA256 signature verification with constant-time comparison
//! - Timestamp validation (5-minute window) for replay attack prevention
//! - Secrets handled via `secrecy::SecretString`
//!
//! When no webhook signing secret is configured the adapter accepts
//! payloads verbatim. That degraded mode is for local testing only; it is
//! logged loudly on every event and `PaymentConfig::validate` refuses it
//! outside development.

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::config::PaymentConfig;
use crate::ports::{
    BillingError, BillingProvider, CheckoutSession, CreateCheckoutRequest, WebhookEvent,
    WebhookEventType,
};

use super::webhook_types::{
    hex_encode, SignatureHeader, StripeCheckoutSession, StripeCreatedSession, StripeWebhookEvent,
};

type HmacSha256 = Hmac<Sha256>;

/// Maximum age for webhook events (5 minutes).
const MAX_TIMESTAMP_AGE_SECS: i64 = 300;

/// Clock skew tolerance for future timestamps (60 seconds).
const MAX_FUTURE_TOLERANCE_SECS: i64 = 60;

/// Product name shown on the checkout line item.
const PRODUCT_NAME: &str = "BrandFuse Strategic Report";

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Webhook signing secret (whsec_...). Absent in degraded local mode.
    webhook_secret: Option<SecretString>,

    /// Base URL for Stripe API (default: https://api.stripe.com).
    api_base_url: String,

    /// Full report price in the smallest currency unit.
    report_price_cents: u64,

    /// ISO currency code.
    currency: String,

    /// Frontend base URL for redirect targets.
    frontend_url: String,
}

impl StripeConfig {
    /// Create a new Stripe configuration.
    pub fn new(api_key: impl Into<String>, webhook_secret: Option<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            webhook_secret: webhook_secret.map(SecretString::new),
            api_base_url: "https://api.stripe.com".to_string(),
            report_price_cents: 499,
            currency: "brl".to_string(),
            frontend_url: "http://localhost:3000".to_string(),
        }
    }

    /// Build configuration from the validated application config.
    pub fn from_payment_config(config: &PaymentConfig) -> Self {
        Self {
            api_key: SecretString::new(config.stripe_api_key.clone()),
            webhook_secret: config
                .stripe_webhook_secret
                .clone()
                .map(SecretString::new),
            api_base_url: "https://api.stripe.com".to_string(),
            report_price_cents: config.report_price_cents,
            currency: config.currency.clone(),
            frontend_url: config.frontend_url.clone(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

/// Stripe billing adapter.
pub struct StripeBillingAdapter {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripeBillingAdapter {
    /// Create a new Stripe adapter with the given configuration.
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Verify webhook signature using HMAC-SHA256.
    ///
    /// # Security
    ///
    /// - Uses constant-time comparison to prevent timing attacks
    /// - Validates timestamp to prevent replay attacks
    fn verify_signature(
        &self,
        payload: &[u8],
        header: &SignatureHeader,
        secret: &SecretString,
    ) -> Result<(), BillingError> {
        // 1. Validate timestamp (prevent replay attacks)
        let now = chrono::Utc::now().timestamp();
        let age = now - header.timestamp;

        if age > MAX_TIMESTAMP_AGE_SECS {
            tracing::warn!(
                event_timestamp = header.timestamp,
                current_time = now,
                age_secs = age,
                "Webhook event too old - possible replay attack"
            );
            return Err(BillingError::invalid_webhook(format!(
                "Event too old ({} seconds)",
                age
            )));
        }

        if age < -MAX_FUTURE_TOLERANCE_SECS {
            tracing::warn!(
                event_timestamp = header.timestamp,
                current_time = now,
                "Webhook event from future - clock skew or manipulation"
            );
            return Err(BillingError::invalid_webhook("Event timestamp in future"));
        }

        // 2. Compute expected signature
        let signed_payload = format!(
            "{}.{}",
            header.timestamp,
            String::from_utf8_lossy(payload)
        );

        let mut mac = HmacSha256::new_from_slice(secret.expose_secret().as_bytes())
            .expect("HMAC can take key of any size");

        mac.update(signed_payload.as_bytes());
        let expected = mac.finalize().into_bytes();

        // 3. Constant-time comparison
        let expected_bytes: &[u8] = expected.as_slice();
        let provided_bytes: &[u8] = &header.v1_signature;

        if expected_bytes.ct_eq(provided_bytes).unwrap_u8() != 1 {
            tracing::warn!(
                expected_signature = hex_encode(expected_bytes),
                "Invalid webhook signature"
            );
            return Err(BillingError::invalid_webhook("Invalid signature"));
        }

        Ok(())
    }

    /// Parse a Stripe event payload into the port's event type.
    fn parse_event(&self, payload: &[u8]) -> Result<WebhookEvent, BillingError> {
        let stripe_event: StripeWebhookEvent = serde_json::from_slice(payload).map_err(|e| {
            tracing::warn!(error = %e, "Failed to parse webhook payload");
            BillingError::invalid_webhook(format!("Invalid JSON: {}", e))
        })?;

        let (event_type, report_id) = match stripe_event.event_type.as_str() {
            "checkout.session.completed" => {
                let session: StripeCheckoutSession =
                    serde_json::from_value(stripe_event.data.object.clone()).map_err(|e| {
                        BillingError::invalid_webhook(format!("Invalid checkout session: {}", e))
                    })?;
                (
                    WebhookEventType::CheckoutSessionCompleted,
                    session.metadata.get("report_id").cloned(),
                )
            }
            other => (WebhookEventType::Unknown(other.to_string()), None),
        };

        Ok(WebhookEvent {
            id: stripe_event.id,
            event_type,
            report_id,
        })
    }
}

#[async_trait]
impl BillingProvider for StripeBillingAdapter {
    async fn create_checkout(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, BillingError> {
        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);
        let report_id = request.report_id.to_string();

        let params = [
            ("mode", "payment".to_string()),
            ("payment_method_types[0]", "card".to_string()),
            (
                "line_items[0][price_data][currency]",
                self.config.currency.clone(),
            ),
            (
                "line_items[0][price_data][product_data][name]",
                PRODUCT_NAME.to_string(),
            ),
            (
                "line_items[0][price_data][unit_amount]",
                self.config.report_price_cents.to_string(),
            ),
            ("line_items[0][quantity]", "1".to_string()),
            ("metadata[report_id]", report_id.clone()),
            (
                "success_url",
                format!(
                    "{}/success?reportId={}",
                    self.config.frontend_url, report_id
                ),
            ),
            ("cancel_url", format!("{}/cancel", self.config.frontend_url)),
        ];

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .form(&params)
            .send()
            .await
            .map_err(|e| BillingError::network(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(error = %error_text, "Stripe create_checkout failed");
            return Err(BillingError::provider(format!(
                "Stripe API error: {}",
                error_text
            )));
        }

        let session: StripeCreatedSession = response.json().await.map_err(|e| {
            BillingError::provider(format!("Failed to parse Stripe response: {}", e))
        })?;

        Ok(CheckoutSession {
            id: session.id,
            url: session.url,
        })
    }

    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: Option<&str>,
    ) -> Result<WebhookEvent, BillingError> {
        match &self.config.webhook_secret {
            Some(secret) => {
                let header_value = signature.ok_or_else(|| {
                    BillingError::invalid_webhook("Missing Stripe-Signature header")
                })?;
                let header = SignatureHeader::parse(header_value)
                    .map_err(|e| BillingError::invalid_webhook(e.to_string()))?;
                self.verify_signature(payload, &header, secret)?;
            }
            None => {
                tracing::warn!(
                    "Stripe webhook secret not configured - accepting unverified payload (local mode)"
                );
            }
        }

        self.parse_event(payload)
    }
}
