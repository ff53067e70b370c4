//! Probe backend configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Configuration for the external signal probes.
///
/// Covers the WHOIS registry lookup backend, the Apify scraping backend
/// for social profile checks, and the shared probe timeout applied to every
/// fanned-out external call.
#[derive(Debug, Clone, Deserialize)]
pub struct ProbeConfig {
    /// WhoisXML API key
    pub whois_api_key: String,

    /// WhoisXML service base URL
    #[serde(default = "default_whois_base_url")]
    pub whois_base_url: String,

    /// Apify API token
    pub apify_token: String,

    /// Apify API base URL
    #[serde(default = "default_apify_base_url")]
    pub apify_base_url: String,

    /// Apify actor ID for the Instagram profile scraper
    #[serde(default = "default_instagram_actor")]
    pub instagram_actor_id: String,

    /// Apify actor ID for the TikTok profile scraper
    #[serde(default = "default_tiktok_actor")]
    pub tiktok_actor_id: String,

    /// Apify actor ID for the X profile scraper
    #[serde(default = "default_x_actor")]
    pub x_actor_id: String,

    /// TLD variants checked for domain availability, in report order
    #[serde(default = "default_tlds")]
    pub tlds: Vec<String>,

    /// Upper bound on each individual probe call, in seconds
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,
}

impl ProbeConfig {
    /// Get the per-probe timeout as Duration
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    /// Validate probe configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.whois_api_key.is_empty() {
            return Err(ValidationError::MissingRequired("WHOIS_API_KEY"));
        }
        if self.apify_token.is_empty() {
            return Err(ValidationError::MissingRequired("APIFY_TOKEN"));
        }
        if self.tlds.is_empty() {
            return Err(ValidationError::EmptyTldList);
        }
        for tld in &self.tlds {
            if !tld.starts_with('.') || tld.len() < 2 {
                return Err(ValidationError::InvalidTld(tld.clone()));
            }
        }
        if self.probe_timeout_secs == 0 || self.probe_timeout_secs > 60 {
            return Err(ValidationError::InvalidProbeTimeout);
        }
        Ok(())
    }
}

fn default_whois_base_url() -> String {
    "https://www.whoisxmlapi.com/whoisserver/WhoisService".to_string()
}

fn default_apify_base_url() -> String {
    "https://api.apify.com".to_string()
}

fn default_instagram_actor() -> String {
    "shu8hvrXbJbY3Eb9W".to_string()
}

fn default_tiktok_actor() -> String {
    "GdWCkxBtKWOsKjdch".to_string()
}

fn default_x_actor() -> String {
    "nfp1fpt5gUlBwPcor".to_string()
}

fn default_tlds() -> Vec<String> {
    vec![
        ".com".to_string(),
        ".com.br".to_string(),
        ".net".to_string(),
        ".org".to_string(),
    ]
}

fn default_probe_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> ProbeConfig {
        ProbeConfig {
            whois_api_key: "at_xxx".to_string(),
            whois_base_url: default_whois_base_url(),
            apify_token: "apify_api_xxx".to_string(),
            apify_base_url: default_apify_base_url(),
            instagram_actor_id: default_instagram_actor(),
            tiktok_actor_id: default_tiktok_actor(),
            x_actor_id: default_x_actor(),
            tlds: default_tlds(),
            probe_timeout_secs: default_probe_timeout(),
        }
    }

    #[test]
    fn default_tld_list_is_ordered() {
        assert_eq!(default_tlds(), vec![".com", ".com.br", ".net", ".org"]);
    }

    #[test]
    fn valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn empty_tld_list_is_rejected() {
        let mut config = valid_config();
        config.tlds.clear();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::EmptyTldList)
        ));
    }

    #[test]
    fn tld_without_leading_dot_is_rejected() {
        let mut config = valid_config();
        config.tlds.push("com".to_string());
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidTld(_))
        ));
    }

    #[test]
    fn zero_probe_timeout_is_rejected() {
        let mut config = valid_config();
        config.probe_timeout_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidProbeTimeout)
        ));
    }
}
