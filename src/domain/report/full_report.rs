//! Full report value object.
//!
//! The paid artifact unlocked by a completed checkout. Derived entirely from
//! the preview signals already stored on the report, so webhook redelivery
//! reproduces a byte-identical artifact.

use serde::{Deserialize, Serialize};

use super::preview::{DomainStatus, PreviewData, SocialStatus, WebsiteStatus};

/// Supplementary analyses listed on every full report.
const ADVANCED_CHECKS: [&str; 3] = ["Trademark check", "Auction analysis", "Domain history"];

/// The full brand availability report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullReport {
    /// The preview signals the report was built from.
    #[serde(flatten)]
    pub preview: PreviewData,

    /// Overall availability score, 0-100.
    pub score: u8,

    /// Supplementary analyses included in the paid tier.
    pub advanced_checks: Vec<String>,
}

impl FullReport {
    /// Synthesizes the full report from stored preview data.
    ///
    /// Deterministic: the same preview always yields the same report.
    pub fn from_preview(preview: &PreviewData) -> Self {
        Self {
            preview: preview.clone(),
            score: availability_score(preview),
            advanced_checks: ADVANCED_CHECKS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Scores how available the brand name looks across all signals.
///
/// Domain availability carries half the weight, free social handles 30
/// points, and an unreachable primary site the remaining 20. Lookup errors
/// count as unavailable signals.
fn availability_score(preview: &PreviewData) -> u8 {
    let domain_total = preview.domain_checks.len() as u32;
    let domains_available = preview
        .domain_checks
        .iter()
        .filter(|c| c.status == DomainStatus::Available)
        .count() as u32;
    let domain_points = if domain_total == 0 {
        0
    } else {
        domains_available * 50 / domain_total
    };

    let social = &preview.social;
    let handles_free = [social.instagram, social.tiktok, social.x]
        .iter()
        .filter(|s| **s == SocialStatus::NotFound)
        .count() as u32;
    let social_points = handles_free * 30 / 3;

    let website_points = match preview.website {
        WebsiteStatus::Down => 20,
        WebsiteStatus::Ok => 0,
    };

    (domain_points + social_points + website_points) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::preview::{DomainCheck, SocialPresence};

    fn preview(domain: DomainStatus, website: WebsiteStatus, social: SocialStatus) -> PreviewData {
        PreviewData {
            domain_checks: vec![
                DomainCheck {
                    domain: "acme.com".to_string(),
                    status: domain,
                },
                DomainCheck {
                    domain: "acme.net".to_string(),
                    status: domain,
                },
            ],
            website,
            social: SocialPresence {
                instagram: social,
                tiktok: social,
                x: social,
            },
        }
    }

    #[test]
    fn fully_available_brand_scores_100() {
        let report = FullReport::from_preview(&preview(
            DomainStatus::Available,
            WebsiteStatus::Down,
            SocialStatus::NotFound,
        ));
        assert_eq!(report.score, 100);
    }

    #[test]
    fn fully_taken_brand_scores_0() {
        let report = FullReport::from_preview(&preview(
            DomainStatus::Taken,
            WebsiteStatus::Ok,
            SocialStatus::Ok,
        ));
        assert_eq!(report.score, 0);
    }

    #[test]
    fn lookup_errors_count_as_unavailable() {
        let report = FullReport::from_preview(&preview(
            DomainStatus::Error,
            WebsiteStatus::Ok,
            SocialStatus::Ok,
        ));
        assert_eq!(report.score, 0);
    }

    #[test]
    fn synthesis_is_deterministic() {
        let p = preview(
            DomainStatus::Available,
            WebsiteStatus::Ok,
            SocialStatus::NotFound,
        );
        assert_eq!(FullReport::from_preview(&p), FullReport::from_preview(&p));
    }

    #[test]
    fn advanced_checks_are_listed() {
        let report = FullReport::from_preview(&preview(
            DomainStatus::Taken,
            WebsiteStatus::Ok,
            SocialStatus::Ok,
        ));
        assert_eq!(
            report.advanced_checks,
            vec!["Trademark check", "Auction analysis", "Domain history"]
        );
    }
}
