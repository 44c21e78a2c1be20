// HTTP request handlers
use crate::domain::error::FleetError;
use crate::infrastructure::chunked_json::stream_from_receiver;
use crate::infrastructure::html_renderer::render_dashboard;
use crate::infrastructure::http_response::{accepts_brotli, json_error, json_response};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct SnapshotQuery {
    pub count: Option<i64>,
    pub seed: Option<u64>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Render the dashboard page
pub async fn dashboard_page(
    query: Result<Query<SnapshotQuery>, QueryRejection>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_error(rejection),
    };
    match state
        .dashboard_service
        .get_dashboard(query.count, query.seed)
        .await
    {
        Ok(dashboard) => Html(render_dashboard(&dashboard)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Raw snapshot table
pub async fn list_trucks(
    query: Result<Query<SnapshotQuery>, QueryRejection>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_error(rejection),
    };
    let compress = accepts_brotli(&headers);

    match state.truck_service.list_trucks(query.count, query.seed).await {
        Ok(snapshot) => match json_response(&snapshot, compress).await {
            Ok(response) => response,
            Err(status) => status.into_response(),
        },
        Err(e) => error_response(e),
    }
}

/// Presented dashboard as JSON
pub async fn get_dashboard(
    query: Result<Query<SnapshotQuery>, QueryRejection>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_error(rejection),
    };
    let compress = accepts_brotli(&headers);

    match state
        .dashboard_service
        .get_dashboard(query.count, query.seed)
        .await
    {
        Ok(dashboard) => match json_response(&dashboard, compress).await {
            Ok(response) => response,
            Err(status) => status.into_response(),
        },
        Err(e) => error_response(e),
    }
}

/// Stream the dashboard section by section (progressive loading)
pub async fn stream_dashboard(
    query: Result<Query<SnapshotQuery>, QueryRejection>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_error(rejection),
    };
    let compress = accepts_brotli(&headers);

    match state
        .streaming_service
        .stream_dashboard(query.count, query.seed)
        .await
    {
        Ok(rx) => stream_from_receiver(rx, compress).await.into_response(),
        Err(e) => error_response(e),
    }
}

fn query_error(rejection: QueryRejection) -> Response {
    let message = rejection.body_text();
    tracing::warn!("Rejected query string: {}", message);
    json_error(StatusCode::BAD_REQUEST, &message)
}

fn error_response(e: anyhow::Error) -> Response {
    match e.downcast_ref::<FleetError>() {
        Some(FleetError::InvalidArgument(message)) => {
            tracing::warn!("Rejected request: {}", message);
            json_error(StatusCode::BAD_REQUEST, message)
        }
        None => {
            tracing::error!("Error building snapshot: {:#}", e);
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        }
    }
}
