// Route table
use crate::application::dashboard_service::DashboardService;
use crate::application::snapshot_source::SnapshotSource;
use crate::application::streaming_service::StreamingDashboardService;
use crate::application::truck_service::TruckService;
use crate::infrastructure::config::DashboardSettings;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    dashboard_page, get_dashboard, health_check, list_trucks, stream_dashboard,
};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_state(source: Arc<dyn SnapshotSource>, dashboard: DashboardSettings) -> Arc<AppState> {
    let truck_service = TruckService::new(source.clone());
    let dashboard_service = DashboardService::new(source, dashboard);
    let streaming_service = StreamingDashboardService::new(dashboard_service.clone());

    Arc::new(AppState {
        truck_service,
        dashboard_service,
        streaming_service,
    })
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(dashboard_page))
        .route("/healthz", get(health_check))
        .route("/api/trucks", get(list_trucks))
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/dashboard/stream", get(stream_dashboard))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
