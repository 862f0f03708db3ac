use crate::cli::ServeArgs;
use crate::infra::{AppState, Dataset, InMemoryBidSource, InMemoryCatalog};
use crate::routes::with_marketplace_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use procure_core::bids::BidComparisonService;
use procure_core::config::AppConfig;
use procure_core::error::AppError;
use procure_core::search::SearchEngine;
use procure_core::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(dataset) = args.dataset.take() {
        config.dataset = Some(dataset);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let dataset = Dataset::load(config.dataset.as_deref())?;
    info!(
        bids = dataset.bids.len(),
        catalog = dataset.catalog.len(),
        source = config
            .dataset
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "bundled demo".to_string()),
        "seeded in-memory marketplace"
    );

    let bid_source = Arc::new(InMemoryBidSource::from_records(dataset.bids));
    let catalog = Arc::new(InMemoryCatalog::new(dataset.catalog));
    let bid_service = Arc::new(BidComparisonService::new(bid_source));
    let search_engine = Arc::new(SearchEngine::new(catalog, config.search));

    let app = with_marketplace_routes(bid_service, search_engine)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "procurement marketplace api ready");

    axum::serve(listener, app).await?;
    Ok(())
}
