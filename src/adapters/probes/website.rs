//! Website reachability probe.
//!
//! Issues a no-body HEAD request against the brand's presumed primary
//! domain. Any non-success response or transport failure reads as down.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::report::WebsiteStatus;
use crate::ports::WebsiteReachabilityProbe;

/// HEAD-request implementation of `WebsiteReachabilityProbe`.
pub struct HeadRequestWebsiteProbe {
    http_client: reqwest::Client,
}

impl HeadRequestWebsiteProbe {
    /// Build the probe with the shared per-probe timeout.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http_client })
    }
}

#[async_trait]
impl WebsiteReachabilityProbe for HeadRequestWebsiteProbe {
    async fn check(&self, brand_name: &str) -> WebsiteStatus {
        let url = format!("https://{}.com", brand_name);

        match self.http_client.head(&url).send().await {
            Ok(response) if response.status().is_success() => WebsiteStatus::Ok,
            Ok(response) => {
                tracing::debug!(url, status = %response.status(), "Website answered non-success");
                WebsiteStatus::Down
            }
            Err(e) => {
                tracing::debug!(url, error = %e, "Website unreachable");
                WebsiteStatus::Down
            }
        }
    }
}
