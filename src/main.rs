//! BrandFuse server binary.
//!
//! Loads and validates configuration, wires the adapters to the application
//! handlers, and serves the HTTP API.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use http::HeaderValue;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use brandfuse::adapters::http::{report_routes, webhook_routes, ReportAppState};
use brandfuse::adapters::postgres::PostgresReportStore;
use brandfuse::adapters::probes::{
    ApifySocialProbe, HeadRequestWebsiteProbe, WhoisXmlDomainProbe,
};
use brandfuse::adapters::stripe::{StripeBillingAdapter, StripeConfig};
use brandfuse::application::handlers::report::BuildPreviewHandler;
use brandfuse::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    if config.payment.stripe_webhook_secret.is_none() {
        tracing::warn!(
            "Running without a Stripe webhook secret - signature verification disabled"
        );
    }

    // Database
    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Migrations applied");
    }

    // Adapters
    let store = Arc::new(PostgresReportStore::new(pool));
    let billing = Arc::new(StripeBillingAdapter::new(StripeConfig::from_payment_config(
        &config.payment,
    )));
    let domain_probe = Arc::new(WhoisXmlDomainProbe::new(&config.probes)?);
    let social_probe = Arc::new(ApifySocialProbe::new(&config.probes)?);
    let website_probe = Arc::new(HeadRequestWebsiteProbe::new(config.probes.probe_timeout())?);

    let build_preview = Arc::new(BuildPreviewHandler::new(
        domain_probe,
        social_probe,
        website_probe,
        config.probes.tlds.clone(),
        config.probes.probe_timeout(),
    ));

    let state = ReportAppState {
        store,
        billing,
        build_preview,
    };

    // Router
    let cors = if config.server.cors_origins_list().is_empty() {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = config
            .server
            .cors_origins_list()
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new().allow_origin(origins)
    };

    let app = Router::new()
        .nest("/api/reports", report_routes())
        .nest("/api/webhooks", webhook_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.server.request_timeout_secs,
                )))
                .layer(cors),
        );

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "BrandFuse listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
