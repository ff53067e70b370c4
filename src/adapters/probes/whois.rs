//! WhoisXML domain availability probe.
//!
//! Queries the WhoisXML registry-lookup API and interprets its response
//! markers. Explicit "no data" error codes, or registry text containing a
//! "No match" marker, mean the domain is available; any other structured
//! record means taken; everything else (transport failure, non-success
//! status, malformed or empty response) is an error status. Failures never
//! cross the port boundary as `Err`.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::config::ProbeConfig;
use crate::domain::report::{DomainCheck, DomainStatus};
use crate::ports::DomainAvailabilityProbe;

/// Registry `dataError` codes that indicate an unregistered domain.
const AVAILABLE_DATA_ERRORS: [&str; 3] = ["MISSING_WHOIS_DATA", "NO_DATA", "INCOMPLETE_DATA"];

/// Registry text marker for an unregistered domain.
const NO_MATCH_MARKER: &str = "No match";

/// WhoisXML-backed implementation of `DomainAvailabilityProbe`.
pub struct WhoisXmlDomainProbe {
    api_key: SecretString,
    base_url: String,
    http_client: reqwest::Client,
}

impl WhoisXmlDomainProbe {
    /// Build the probe from validated configuration.
    pub fn new(config: &ProbeConfig) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(config.probe_timeout())
            .build()?;

        Ok(Self {
            api_key: SecretString::new(config.whois_api_key.clone()),
            base_url: config.whois_base_url.clone(),
            http_client,
        })
    }

    async fn lookup(&self, domain: &str) -> Result<WhoisResponse, reqwest::Error> {
        self.http_client
            .get(&self.base_url)
            .query(&[
                ("apiKey", self.api_key.expose_secret().as_str()),
                ("domainName", domain),
                ("outputFormat", "JSON"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

#[async_trait]
impl DomainAvailabilityProbe for WhoisXmlDomainProbe {
    async fn check(&self, domain: &str) -> DomainCheck {
        let status = match self.lookup(domain).await {
            Ok(response) => interpret_record(response.whois_record.as_ref()),
            Err(e) => {
                tracing::warn!(domain, error = %e, "WHOIS lookup failed");
                DomainStatus::Error
            }
        };

        DomainCheck {
            domain: domain.to_string(),
            status,
        }
    }
}

/// Classify a registry record. A missing record is an error status, not an
/// availability signal.
fn interpret_record(record: Option<&WhoisRecord>) -> DomainStatus {
    let Some(record) = record else {
        return DomainStatus::Error;
    };

    let data_error_says_free = record
        .data_error
        .as_deref()
        .is_some_and(|code| AVAILABLE_DATA_ERRORS.contains(&code));

    let registry_text_says_free = record.registry_data.as_ref().is_some_and(|data| {
        data.raw_text
            .as_deref()
            .is_some_and(|t| t.contains(NO_MATCH_MARKER))
            || data
                .stripped_text
                .as_deref()
                .is_some_and(|t| t.contains(NO_MATCH_MARKER))
    });

    if data_error_says_free || registry_text_says_free {
        DomainStatus::Available
    } else {
        DomainStatus::Taken
    }
}

#[derive(Debug, Deserialize)]
struct WhoisResponse {
    #[serde(rename = "WhoisRecord")]
    whois_record: Option<WhoisRecord>,
}

#[derive(Debug, Deserialize)]
struct WhoisRecord {
    #[serde(rename = "dataError")]
    data_error: Option<String>,

    #[serde(rename = "registryData")]
    registry_data: Option<RegistryData>,
}

#[derive(Debug, Deserialize)]
struct RegistryData {
    #[serde(rename = "rawText")]
    raw_text: Option<String>,

    #[serde(rename = "strippedText")]
    stripped_text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: serde_json::Value) -> WhoisRecord {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn missing_record_is_an_error() {
        assert_eq!(interpret_record(None), DomainStatus::Error);
    }

    #[test]
    fn no_data_error_codes_mean_available() {
        for code in AVAILABLE_DATA_ERRORS {
            let r = record(serde_json::json!({ "dataError": code }));
            assert_eq!(interpret_record(Some(&r)), DomainStatus::Available, "{code}");
        }
    }

    #[test]
    fn no_match_registry_text_means_available() {
        let r = record(serde_json::json!({
            "registryData": {"rawText": "No match for domain ACME.COM"}
        }));
        assert_eq!(interpret_record(Some(&r)), DomainStatus::Available);

        let r = record(serde_json::json!({
            "registryData": {"strippedText": "No match"}
        }));
        assert_eq!(interpret_record(Some(&r)), DomainStatus::Available);
    }

    #[test]
    fn structured_record_without_markers_means_taken() {
        let r = record(serde_json::json!({
            "registryData": {"rawText": "Domain Name: ACME.COM\nRegistrar: Example"}
        }));
        assert_eq!(interpret_record(Some(&r)), DomainStatus::Taken);
    }

    #[test]
    fn unrelated_data_error_means_taken() {
        let r = record(serde_json::json!({ "dataError": "RATE_LIMITED" }));
        assert_eq!(interpret_record(Some(&r)), DomainStatus::Taken);
    }
}
