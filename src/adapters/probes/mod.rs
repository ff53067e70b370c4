//! Probe adapters - external signal source implementations.

mod apify;
mod website;
mod whois;

pub use apify::ApifySocialProbe;
pub use website::HeadRequestWebsiteProbe;
pub use whois::WhoisXmlDomainProbe;
