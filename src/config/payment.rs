//! Payment configuration (Stripe)

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Payment configuration (Stripe)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentConfig {
    /// Stripe API key
    pub stripe_api_key: String,

    /// Stripe webhook signing secret.
    ///
    /// When absent, webhook signature verification is skipped entirely.
    /// That degraded mode exists for local testing against the Stripe CLI
    /// and is rejected by `validate` outside development.
    pub stripe_webhook_secret: Option<String>,

    /// Price of the full report in the smallest currency unit
    #[serde(default = "default_report_price")]
    pub report_price_cents: u64,

    /// ISO currency code for checkout
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Frontend base URL for checkout success/cancel redirects
    pub frontend_url: String,
}

impl PaymentConfig {
    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        self.stripe_api_key.starts_with("sk_test_")
    }

    /// Check if using Stripe live mode
    pub fn is_live_mode(&self) -> bool {
        self.stripe_api_key.starts_with("sk_live_")
    }

    /// Validate payment configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.stripe_api_key.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_API_KEY"));
        }
        if !self.stripe_api_key.starts_with("sk_") {
            return Err(ValidationError::InvalidStripeKey);
        }

        match &self.stripe_webhook_secret {
            Some(secret) if !secret.starts_with("whsec_") => {
                return Err(ValidationError::InvalidStripeWebhookSecret);
            }
            None if *environment != Environment::Development => {
                return Err(ValidationError::MissingRequired("STRIPE_WEBHOOK_SECRET"));
            }
            _ => {}
        }

        if self.frontend_url.is_empty() {
            return Err(ValidationError::MissingRequired("FRONTEND_URL"));
        }
        if !self.frontend_url.starts_with("http://") && !self.frontend_url.starts_with("https://") {
            return Err(ValidationError::InvalidFrontendUrl);
        }

        Ok(())
    }
}

fn default_report_price() -> u64 {
    499
}

fn default_currency() -> String {
    "brl".to_string()
}
