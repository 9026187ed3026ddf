//! DonorLens API Server
//!
//! Backend for a donation-crowdfunding site: proxies fundraiser data from the
//! ledger, stores expense reports uploaded by fundraiser owners, and ranks
//! fundraisers by how much of what they raised their reports account for.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{FsReportStore, LedgerClient};
use app::report_config::MULTIPART_OVERHEAD_BYTES;
use app::{FundraiserService, RankingService, ReportService};
use config::Config;
use domain::ports::{FundraiserSource, ReportStore};

/// Application state shared across all handlers
///
/// Built once at startup; every request reaches the ledger and the report
/// store through these services rather than through globals.
#[derive(Clone)]
pub struct AppState {
    pub fundraiser_service: Arc<FundraiserService<dyn FundraiserSource>>,
    pub ranking_service: Arc<RankingService<dyn FundraiserSource, dyn ReportStore>>,
    pub report_service: Arc<ReportService<dyn FundraiserSource, dyn ReportStore>>,
}

impl AppState {
    pub fn new(
        fundraisers: Arc<dyn FundraiserSource>,
        reports: Arc<dyn ReportStore>,
        config: &Config,
    ) -> Self {
        Self {
            fundraiser_service: Arc::new(FundraiserService::new(
                fundraisers.clone(),
                config.currency_decimals,
            )),
            ranking_service: Arc::new(RankingService::new(
                fundraisers.clone(),
                reports.clone(),
                config.currency_decimals,
            )),
            report_service: Arc::new(ReportService::new(
                fundraisers,
                reports,
                config.max_report_bytes,
            )),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Report upload route, with a body limit sized to the report limit
fn upload_routes(max_report_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/api/upload-expense-report",
            post(handlers::upload_expense_report),
        )
        .layer(DefaultBodyLimit::max(
            max_report_bytes + MULTIPART_OVERHEAD_BYTES,
        ))
}

/// Assemble the full router around the given upload routes
fn build_app(state: AppState, uploads: Router<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health))
        // Ledger views
        .route("/fundraisers", get(handlers::list_fundraisers))
        .route("/api/ngo-profile/:address", get(handlers::get_ngo_profile))
        .route("/api/transactions/:address", get(handlers::get_transactions))
        // Rankings
        .route("/api/public-rankings", get(handlers::get_public_rankings))
        .route("/api/rankings", get(handlers::get_creator_rankings))
        .merge(uploads)
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,donorlens_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting DonorLens API...");

    // Load configuration
    let config = Config::from_env();

    // Create adapters
    let report_store = Arc::new(FsReportStore::new(&config.reports_dir));
    report_store
        .ensure_dir()
        .await
        .with_context(|| format!("Failed to create reports directory {}", config.reports_dir))?;
    tracing::info!(reports_dir = %report_store.root().display(), "Report store ready");

    let ledger = Arc::new(LedgerClient::new(
        config.ledger_url.clone(),
        config.ledger_api_token.clone(),
    ));
    tracing::info!(ledger_url = %config.ledger_url, "Ledger client configured");

    let state = AppState::new(ledger, report_store, &config);

    // Rate limiting for uploads, keyed on the peer's socket address
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(config.upload_rate_per_second)
            .burst_size(config.upload_burst)
            .finish()
            .context("Invalid upload rate limit configuration")?,
    );

    let uploads = upload_routes(config.max_report_bytes).layer(GovernorLayer {
        config: governor_config,
    });
    let app = build_app(state, uploads);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
