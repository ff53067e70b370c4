//! Stripe adapter - billing provider implementation.

mod mock_billing_provider;
mod stripe_adapter;
mod webhook_types;

pub use mock_billing_provider::MockBillingProvider;
pub use stripe_adapter::{StripeBillingAdapter, StripeConfig};
pub use webhook_types::{SignatureHeader, SignatureParseError};
