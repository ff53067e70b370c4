//! PostgreSQL adapters - durable persistence implementations.

mod report_store;

pub use report_store::PostgresReportStore;
