//! Preview data value objects.
//!
//! The preview is the aggregation of every probe result for a brand name.
//! It is computed once, before the report record is created, and never
//! recomputed. Probe failures are already normalized into per-item statuses
//! by the time values of these types exist.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a single registry lookup for one domain variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainStatus {
    /// Registry reported no record for the domain.
    Available,

    /// A registration record exists.
    Taken,

    /// Lookup failed (transport error, malformed response, missing record).
    Error,
}

/// Per-TLD-variant registry check result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainCheck {
    pub domain: String,
    pub status: DomainStatus,
}

/// Reachability of the brand's presumed primary website.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebsiteStatus {
    /// The site answered a HEAD request with a success status.
    Ok,

    /// Non-success response or transport failure.
    Down,
}

/// Existence of a social profile under the brand's handle.
///
/// Probe failures collapse to `NotFound` rather than surfacing a distinct
/// error state; one failing scraping backend degrades a single field, not
/// the whole preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SocialStatus {
    #[serde(rename = "ok")]
    Ok,

    #[serde(rename = "not found")]
    NotFound,
}

/// The fixed set of social platforms probed for every report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Instagram,
    Tiktok,
    X,
}

impl SocialPlatform {
    /// All probed platforms, in report order.
    pub const ALL: [SocialPlatform; 3] = [
        SocialPlatform::Instagram,
        SocialPlatform::Tiktok,
        SocialPlatform::X,
    ];
}

impl fmt::Display for SocialPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SocialPlatform::Instagram => "instagram",
            SocialPlatform::Tiktok => "tiktok",
            SocialPlatform::X => "x",
        };
        write!(f, "{}", s)
    }
}

/// Social presence across the fixed platform set.
///
/// Every platform always contributes an entry; there is no way to construct
/// a presence value with a platform missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialPresence {
    pub instagram: SocialStatus,
    pub tiktok: SocialStatus,
    pub x: SocialStatus,
}

impl SocialPresence {
    /// Returns the status for a platform.
    pub fn get(&self, platform: SocialPlatform) -> SocialStatus {
        match platform {
            SocialPlatform::Instagram => self.instagram,
            SocialPlatform::Tiktok => self.tiktok,
            SocialPlatform::X => self.x,
        }
    }
}

/// Aggregated probe results for one brand name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewData {
    /// Registry checks, ordered per the configured TLD list.
    pub domain_checks: Vec<DomainCheck>,

    /// Reachability of `https://{brand}.com`.
    pub website: WebsiteStatus,

    /// Profile existence per social platform.
    pub social: SocialPresence,
}
