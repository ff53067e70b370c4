//! Probe ports for the external signal sources.
//!
//! All three probe families share one contract: bounded execution time and
//! total failure isolation. A probe never returns `Err` and never panics
//! across this boundary; transport failures, malformed responses, and
//! backend errors are encoded in the returned status so that one failing
//! third-party dependency degrades a single preview field.

use async_trait::async_trait;

use crate::domain::report::{DomainCheck, SocialPlatform, SocialStatus, WebsiteStatus};

/// Port for registry-lookup domain availability checks.
#[async_trait]
pub trait DomainAvailabilityProbe: Send + Sync {
    /// Check registration status for one fully-qualified domain.
    async fn check(&self, domain: &str) -> DomainCheck;
}

/// Port for social profile existence checks.
///
/// Implementations interpret backend results per platform; the aggregator
/// never sees platform-specific rules.
#[async_trait]
pub trait SocialPresenceProbe: Send + Sync {
    /// Check whether a profile exists for the brand handle on a platform.
    async fn check(&self, platform: SocialPlatform, brand_name: &str) -> SocialStatus;
}

/// Port for live website reachability checks.
#[async_trait]
pub trait WebsiteReachabilityProbe: Send + Sync {
    /// Check whether the brand's presumed primary site answers.
    async fn check(&self, brand_name: &str) -> WebsiteStatus;
}
