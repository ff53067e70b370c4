//! Apify social profile presence probe.
//!
//! Runs a platform-specific Apify actor synchronously and interprets the
//! returned dataset items. Each platform's actor id, profile URL shape,
//! results type, and success-interpretation rule live together in a
//! `PlatformSpec` record selected by platform, so adding or adjusting a
//! platform never touches the aggregation path. Any transport or backend
//! error collapses to "not found".

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use crate::config::ProbeConfig;
use crate::domain::report::{SocialPlatform, SocialStatus};
use crate::ports::SocialPresenceProbe;

/// Per-platform probe rules: which actor to run, how to address the
/// profile, and how to read the actor's output.
struct PlatformSpec {
    actor_id: String,
    profile_url: String,
    results_type: &'static str,
    interpret: fn(&[Value]) -> SocialStatus,
}

/// Apify-backed implementation of `SocialPresenceProbe`.
pub struct ApifySocialProbe {
    token: SecretString,
    base_url: String,
    instagram_actor_id: String,
    tiktok_actor_id: String,
    x_actor_id: String,
    http_client: reqwest::Client,
}

impl ApifySocialProbe {
    /// Build the probe from validated configuration.
    pub fn new(config: &ProbeConfig) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(config.probe_timeout())
            .build()?;

        Ok(Self {
            token: SecretString::new(config.apify_token.clone()),
            base_url: config.apify_base_url.clone(),
            instagram_actor_id: config.instagram_actor_id.clone(),
            tiktok_actor_id: config.tiktok_actor_id.clone(),
            x_actor_id: config.x_actor_id.clone(),
            http_client,
        })
    }

    fn spec_for(&self, platform: SocialPlatform, brand_name: &str) -> PlatformSpec {
        match platform {
            SocialPlatform::Instagram => PlatformSpec {
                actor_id: self.instagram_actor_id.clone(),
                profile_url: format!("https://www.instagram.com/{}/", brand_name),
                results_type: "details",
                interpret: interpret_instagram,
            },
            SocialPlatform::Tiktok => PlatformSpec {
                actor_id: self.tiktok_actor_id.clone(),
                profile_url: format!("https://www.tiktok.com/@{}", brand_name),
                results_type: "profile",
                interpret: interpret_tiktok,
            },
            SocialPlatform::X => PlatformSpec {
                actor_id: self.x_actor_id.clone(),
                profile_url: format!("https://x.com/{}", brand_name),
                results_type: "profile",
                interpret: interpret_x,
            },
        }
    }

    /// Run the actor synchronously and return its dataset items.
    async fn run_actor(&self, spec: &PlatformSpec) -> Result<Vec<Value>, reqwest::Error> {
        let url = format!(
            "{}/v2/acts/{}/run-sync-get-dataset-items",
            self.base_url, spec.actor_id
        );

        self.http_client
            .post(&url)
            .query(&[("token", self.token.expose_secret().as_str())])
            .json(&serde_json::json!({
                "directUrls": [spec.profile_url],
                "resultsType": spec.results_type,
                "resultsLimit": 1,
            }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

#[async_trait]
impl SocialPresenceProbe for ApifySocialProbe {
    async fn check(&self, platform: SocialPlatform, brand_name: &str) -> SocialStatus {
        let spec = self.spec_for(platform, brand_name);

        match self.run_actor(&spec).await {
            Ok(items) => (spec.interpret)(&items),
            Err(e) => {
                tracing::warn!(
                    platform = %platform,
                    brand_name,
                    error = %e,
                    "Social probe failed"
                );
                SocialStatus::NotFound
            }
        }
    }
}

/// Instagram: an empty result set or an explicit `no_items` error record
/// means the profile does not exist.
fn interpret_instagram(items: &[Value]) -> SocialStatus {
    match items.first() {
        None => SocialStatus::NotFound,
        Some(item) if item.get("error").and_then(Value::as_str) == Some("no_items") => {
            SocialStatus::NotFound
        }
        Some(_) => SocialStatus::Ok,
    }
}

/// TikTok: an empty result set or a demo/placeholder record means the
/// profile does not exist.
fn interpret_tiktok(items: &[Value]) -> SocialStatus {
    match items.first() {
        None => SocialStatus::NotFound,
        Some(item) if is_demo(item) => SocialStatus::NotFound,
        Some(_) => SocialStatus::Ok,
    }
}

/// X: the actor pads results with demo records; the profile exists only if
/// some item is not flagged as one.
fn interpret_x(items: &[Value]) -> SocialStatus {
    if items.iter().any(|item| !is_demo(item)) {
        SocialStatus::Ok
    } else {
        SocialStatus::NotFound
    }
}

fn is_demo(item: &Value) -> bool {
    item.get("demo").and_then(Value::as_bool).unwrap_or(false)
}
