use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryAttemptRepository, InMemoryCreatorRepository, InMemoryQuizRepository,
};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use creator_hub::bonus::BonusEngine;
use creator_hub::config::AppConfig;
use creator_hub::creators::CreatorInsightsService;
use creator_hub::error::AppError;
use creator_hub::learning::QuizService;
use creator_hub::telemetry;
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

    telemetry::init(&config.telemetry)?;

    let table = config.bonus.tier_table()?;
    info!(
        tiers = table.len(),
        source = config
            .bonus
            .tier_table_path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "standard".to_string()),
        "bonus tier table loaded"
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let creator_service = Arc::new(CreatorInsightsService::new(
        Arc::new(InMemoryCreatorRepository::seeded()),
        BonusEngine::new(table),
        config.bonus.targets,
    ));
    let quiz_service = Arc::new(QuizService::new(
        Arc::new(InMemoryQuizRepository::seeded()),
        Arc::new(InMemoryAttemptRepository::default()),
    ));

    let app = with_service_routes(creator_service, quiz_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "creator hub ready");

    axum::serve(listener, app).await?;
    Ok(())
}
