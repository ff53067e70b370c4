//! BrandFuse - Brand availability report service.
//!
//! Probes independent external signal sources (domain registries, social
//! profiles, live websites) concurrently for a candidate brand name and
//! gates the full report behind an asynchronous payment completion event.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
