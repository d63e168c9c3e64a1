//! Creator dashboards, manager rosters, and the bonus calculator exercised through the
//! service facade and HTTP router.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use creator_hub::bonus::BonusEngine;
    use creator_hub::creators::{
        CreatorHandle, CreatorId, CreatorInsightsService, CreatorRecord, CreatorRepository,
        ManagerId, TargetDefaults,
    };
    use creator_hub::RepositoryError;

    #[derive(Default, Clone)]
    pub(super) struct MemoryCreators {
        records: Arc<Mutex<HashMap<CreatorHandle, CreatorRecord>>>,
    }

    impl MemoryCreators {
        pub(super) fn with(records: Vec<CreatorRecord>) -> Self {
            let store = Self::default();
            {
                let mut guard = store.records.lock().expect("creator mutex poisoned");
                for record in records {
                    guard.insert(record.creator_handle.clone(), record);
                }
            }
            store
        }
    }

    impl CreatorRepository for MemoryCreators {
        fn fetch_by_handle(
            &self,
            handle: &CreatorHandle,
        ) -> Result<Option<CreatorRecord>, RepositoryError> {
            let guard = self.records.lock().expect("creator mutex poisoned");
            Ok(guard.get(handle).cloned())
        }

        fn assigned_to(
            &self,
            manager_id: &ManagerId,
        ) -> Result<Vec<CreatorRecord>, RepositoryError> {
            let guard = self.records.lock().expect("creator mutex poisoned");
            Ok(guard
                .values()
                .filter(|record| record.assigned_manager_id.as_ref() == Some(manager_id))
                .cloned()
                .collect())
        }
    }

    pub(super) struct OfflineCreators;

    impl CreatorRepository for OfflineCreators {
        fn fetch_by_handle(
            &self,
            _handle: &CreatorHandle,
        ) -> Result<Option<CreatorRecord>, RepositoryError> {
            Err(RepositoryError::Unavailable("backend offline".to_string()))
        }

        fn assigned_to(
            &self,
            _manager_id: &ManagerId,
        ) -> Result<Vec<CreatorRecord>, RepositoryError> {
            Err(RepositoryError::Unavailable("backend offline".to_string()))
        }
    }

    pub(super) fn creator(handle: &str, total: i64, days: i64, seconds: i64) -> CreatorRecord {
        CreatorRecord {
            id: CreatorId(format!("id-{handle}")),
            creator_handle: CreatorHandle(handle.to_string()),
            first_name: "Ava".to_string(),
            last_name: "Stone".to_string(),
            region: Some("USA / Canada".to_string()),
            diamonds_monthly: Some(total / 4),
            total_diamonds: Some(total),
            diamonds_30d: Some(total / 4),
            live_days_30d: Some(days),
            live_duration_seconds_30d: Some(seconds),
            graduation_status: Some("Silver".to_string()),
            silver_target: None,
            gold_target: None,
            assigned_manager_id: Some(ManagerId("mgr-7".to_string())),
            is_active: true,
        }
    }

    pub(super) fn service(
        records: Vec<CreatorRecord>,
    ) -> Arc<CreatorInsightsService<MemoryCreators>> {
        Arc::new(CreatorInsightsService::new(
            Arc::new(MemoryCreators::with(records)),
            BonusEngine::default(),
            TargetDefaults::default(),
        ))
    }
}

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use common::*;
use creator_hub::bonus::BonusEngine;
use creator_hub::creators::{
    creator_router, CreatorHandle, CreatorInsightsService, InsightsError, ManagerId,
    ProgressTarget, TargetDefaults,
};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}

#[test]
fn dashboard_combines_stats_and_tier() {
    // 22 live days, 100 hours, 1.6M diamonds: Elite.
    let service = service(vec![creator("ava", 1_600_000, 22, 360_000)]);

    let dashboard = service
        .dashboard(&CreatorHandle("ava".to_string()))
        .expect("dashboard builds");

    assert_eq!(dashboard.display_name, "Ava Stone");
    assert_eq!(dashboard.stats.live_hours, 100);
    assert_eq!(dashboard.stats.next_target, ProgressTarget::Gold);
    assert_eq!(dashboard.stats.remaining, 0);
    assert_eq!(dashboard.tier.qualified_tier.as_deref(), Some("Elite"));
}

#[test]
fn dashboard_floors_partial_hours_before_gating() {
    // 99h59m of streaming is 99 whole hours, one short of Elite.
    let service = service(vec![creator("ava", 1_600_000, 22, 359_999)]);

    let dashboard = service
        .dashboard(&CreatorHandle("ava".to_string()))
        .expect("dashboard builds");

    assert_eq!(dashboard.stats.live_hours, 99);
    assert_eq!(dashboard.tier.qualified_tier, None);
    assert!(dashboard.tier.activity_gate_met);
    assert!(dashboard.tier.diamond_gate_met);
}

#[test]
fn dashboard_rejects_unknown_and_inactive_creators() {
    let mut dormant = creator("dormant", 10, 1, 60);
    dormant.is_active = false;
    let service = service(vec![dormant]);

    for handle in ["nobody", "dormant"] {
        match service.dashboard(&CreatorHandle(handle.to_string())) {
            Err(InsightsError::CreatorNotFound(found)) => assert_eq!(found.0, handle),
            other => panic!("expected not found for {handle}, got {other:?}"),
        }
    }
}

#[test]
fn repository_failures_propagate() {
    let service = CreatorInsightsService::new(
        Arc::new(OfflineCreators),
        BonusEngine::default(),
        TargetDefaults::default(),
    );

    assert!(matches!(
        service.roster(&ManagerId("mgr-7".to_string())),
        Err(InsightsError::Repository(_))
    ));
}

#[test]
fn roster_summarizes_assigned_creators() {
    let mut rookie = creator("rookie", 40_000, 3, 3_600);
    rookie.graduation_status = None;
    let service = service(vec![creator("ava", 1_600_000, 22, 360_000), rookie]);

    let roster = service
        .roster(&ManagerId("mgr-7".to_string()))
        .expect("roster loads");

    assert_eq!(roster.summary.total_creators, 2);
    assert_eq!(roster.summary.total_rookies, 1);
    assert_eq!(roster.summary.total_graduated, 1);
    assert_eq!(roster.summary.collective_diamonds, 410_000);
    assert_eq!(roster.creators[0].creator_handle.0, "ava");
}

#[tokio::test]
async fn classify_route_normalizes_and_reports_gates() {
    let router = creator_router(service(Vec::new()));

    let response = router
        .oneshot(
            Request::post("/api/v1/bonus/classify")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "days_streamed": 22,
                        "hours_streamed": 100,
                        "diamonds_earned": 50_000
                    })
                    .to_string(),
                ))
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["qualified_tier"], Value::Null);
    assert_eq!(body["activity_gate_met"], true);
    assert_eq!(body["diamond_gate_met"], false);
    assert_eq!(body["payout"], json!({ "min": 0, "max": 0 }));
}

#[tokio::test]
async fn tiers_route_lists_schedule_highest_first() {
    let router = creator_router(service(Vec::new()));

    let response = router
        .oneshot(
            Request::get("/api/v1/bonus/tiers")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    let body = json_body(response).await;
    let names: Vec<_> = body
        .as_array()
        .expect("array of tiers")
        .iter()
        .map(|tier| tier["name"].as_str().expect("name").to_string())
        .collect();
    assert_eq!(names, ["Elite", "Expert", "Ascensus"]);
}

#[tokio::test]
async fn dashboard_route_returns_not_found_for_unknown_creator() {
    let router = creator_router(service(Vec::new()));

    let response = router
        .oneshot(
            Request::get("/api/v1/creators/ghost/dashboard")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert!(body["error"].as_str().expect("error text").contains("ghost"));
}

#[tokio::test]
async fn dashboard_route_serializes_stats() {
    let router = creator_router(service(vec![creator("ava", 250_000, 18, 36_000)]));

    let response = router
        .oneshot(
            Request::get("/api/v1/creators/ava/dashboard")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["stats"]["live_hours"], 10);
    assert_eq!(body["stats"]["next_target"], "Gold");
    assert_eq!(body["stats"]["remaining"], 250_000);
}
