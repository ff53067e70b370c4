//! BuildPreviewHandler - concurrent multi-source preview aggregation.
//!
//! Fans out every probe for one brand name concurrently: one registry check
//! per configured TLD, the website reachability check, and one social check
//! per platform. The handler is infallible; probe adapters normalize their
//! own failures and the per-call timeout applied here normalizes stalls, so
//! the result is always a complete `PreviewData`.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::time::timeout;

use crate::domain::report::{
    DomainCheck, DomainStatus, PreviewData, SocialPlatform, SocialPresence, SocialStatus,
    WebsiteStatus,
};
use crate::ports::{DomainAvailabilityProbe, SocialPresenceProbe, WebsiteReachabilityProbe};

/// Command to build preview data for a brand name.
#[derive(Debug, Clone)]
pub struct BuildPreviewCommand {
    pub brand_name: String,
}

/// Handler that aggregates all probe results into a preview.
pub struct BuildPreviewHandler {
    domain_probe: Arc<dyn DomainAvailabilityProbe>,
    social_probe: Arc<dyn SocialPresenceProbe>,
    website_probe: Arc<dyn WebsiteReachabilityProbe>,
    tlds: Vec<String>,
    probe_timeout: Duration,
}

impl BuildPreviewHandler {
    pub fn new(
        domain_probe: Arc<dyn DomainAvailabilityProbe>,
        social_probe: Arc<dyn SocialPresenceProbe>,
        website_probe: Arc<dyn WebsiteReachabilityProbe>,
        tlds: Vec<String>,
        probe_timeout: Duration,
    ) -> Self {
        Self {
            domain_probe,
            social_probe,
            website_probe,
            tlds,
            probe_timeout,
        }
    }

    /// Builds the preview, returning only after every probe has settled.
    ///
    /// `domain_checks` order matches the configured TLD list regardless of
    /// completion order; every social platform always contributes an entry.
    pub async fn handle(&self, cmd: BuildPreviewCommand) -> PreviewData {
        let brand_name = cmd.brand_name;

        let domain_futures = self
            .tlds
            .iter()
            .map(|tld| self.check_domain(format!("{}{}", brand_name, tld)));

        let (domain_checks, website, (instagram, tiktok, x)) = tokio::join!(
            join_all(domain_futures),
            self.check_website(&brand_name),
            async {
                tokio::join!(
                    self.check_social(SocialPlatform::Instagram, &brand_name),
                    self.check_social(SocialPlatform::Tiktok, &brand_name),
                    self.check_social(SocialPlatform::X, &brand_name),
                )
            },
        );

        PreviewData {
            domain_checks,
            website,
            social: SocialPresence {
                instagram,
                tiktok,
                x,
            },
        }
    }

    async fn check_domain(&self, domain: String) -> DomainCheck {
        match timeout(self.probe_timeout, self.domain_probe.check(&domain)).await {
            Ok(check) => check,
            Err(_) => {
                tracing::warn!(domain = %domain, "Domain probe timed out");
                DomainCheck {
                    domain,
                    status: DomainStatus::Error,
                }
            }
        }
    }

    async fn check_social(&self, platform: SocialPlatform, brand_name: &str) -> SocialStatus {
        match timeout(
            self.probe_timeout,
            self.social_probe.check(platform, brand_name),
        )
        .await
        {
            Ok(status) => status,
            Err(_) => {
                tracing::warn!(platform = %platform, brand_name, "Social probe timed out");
                SocialStatus::NotFound
            }
        }
    }

    async fn check_website(&self, brand_name: &str) -> WebsiteStatus {
        match timeout(self.probe_timeout, self.website_probe.check(brand_name)).await {
            Ok(status) => status,
            Err(_) => {
                tracing::warn!(brand_name, "Website probe timed out");
                WebsiteStatus::Down
            }
        }
    }
}
