//! Report domain - the brand availability report aggregate and its values.

mod aggregate;
mod errors;
mod full_report;
mod preview;
mod status;

pub use aggregate::{Report, MAX_BRAND_NAME_LENGTH};
pub use errors::ReportError;
pub use full_report::FullReport;
pub use preview::{
    DomainCheck, DomainStatus, PreviewData, SocialPlatform, SocialPresence, SocialStatus,
    WebsiteStatus,
};
pub use status::ReportStatus;
