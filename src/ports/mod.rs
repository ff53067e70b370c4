//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ReportStore` - durable report persistence with one atomic CAS point
//! - `BillingProvider` - checkout creation and webhook authentication
//! - `DomainAvailabilityProbe` / `SocialPresenceProbe` /
//!   `WebsiteReachabilityProbe` - the external signal sources, failure
//!   normalized by contract

mod billing_provider;
mod probes;
mod report_store;

pub use billing_provider::{
    BillingError, BillingErrorCode, BillingProvider, CheckoutSession, CreateCheckoutRequest,
    WebhookEvent, WebhookEventType,
};
pub use probes::{DomainAvailabilityProbe, SocialPresenceProbe, WebsiteReachabilityProbe};
pub use report_store::{PaymentOutcome, ReportStore};
