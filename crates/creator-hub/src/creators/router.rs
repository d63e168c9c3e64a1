use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use super::domain::{CreatorHandle, ManagerId};
use super::repository::CreatorRepository;
use super::roster::ManagerRoster;
use super::service::{CreatorDashboard, CreatorInsightsService};
use crate::bonus::{CreatorMetrics, TierResult, TierTable};
use crate::error::AppError;

/// Router exposing the dashboard, manager roster, and bonus calculator endpoints.
pub fn creator_router<C>(service: Arc<CreatorInsightsService<C>>) -> Router
where
    C: CreatorRepository + 'static,
{
    Router::new()
        .route("/api/v1/bonus/tiers", get(tiers_handler::<C>))
        .route("/api/v1/bonus/classify", post(classify_handler::<C>))
        .route(
            "/api/v1/creators/:creator_handle/dashboard",
            get(dashboard_handler::<C>),
        )
        .route(
            "/api/v1/managers/:manager_id/roster",
            get(roster_handler::<C>),
        )
        .with_state(service)
}

pub(crate) async fn tiers_handler<C>(
    State(service): State<Arc<CreatorInsightsService<C>>>,
) -> Json<TierTable>
where
    C: CreatorRepository + 'static,
{
    Json(service.tiers().clone())
}

pub(crate) async fn classify_handler<C>(
    State(service): State<Arc<CreatorInsightsService<C>>>,
    Json(metrics): Json<CreatorMetrics>,
) -> Json<TierResult>
where
    C: CreatorRepository + 'static,
{
    Json(service.classify(&metrics))
}

pub(crate) async fn dashboard_handler<C>(
    State(service): State<Arc<CreatorInsightsService<C>>>,
    Path(creator_handle): Path<String>,
) -> Result<Json<CreatorDashboard>, AppError>
where
    C: CreatorRepository + 'static,
{
    let dashboard = service.dashboard(&CreatorHandle(creator_handle))?;
    Ok(Json(dashboard))
}

pub(crate) async fn roster_handler<C>(
    State(service): State<Arc<CreatorInsightsService<C>>>,
    Path(manager_id): Path<String>,
) -> Result<Json<ManagerRoster>, AppError>
where
    C: CreatorRepository + 'static,
{
    let roster = service.roster(&ManagerId(manager_id))?;
    Ok(Json(roster))
}
