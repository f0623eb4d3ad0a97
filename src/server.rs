//! HTTP host for the dashboard.
//!
//! Each request reruns the whole pipeline on the blocking pool with the widget
//! state taken from the query string. Nothing is shared between requests
//! besides the configuration.

use crate::config::DashboardConfig;
use crate::dashboard::html::render_error_page;
use crate::dashboard::{render, Dashboard, DashboardState};
use crate::error::{DashboardError, ErrorClass};
use crate::weather_data::data_loader::WeatherDataLoader;
use crate::weather_data::error::WeatherDataError;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use log::{error, info, warn};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;

/// Widget values carried by the query string.
#[derive(Debug, Default, Deserialize)]
pub struct WidgetQuery {
    pub month: Option<u32>,
}

pub fn build_router(config: DashboardConfig) -> Router {
    Router::new()
        .route("/", get(page_handler))
        .route("/api/dashboard", get(json_handler))
        .route("/health", get(health_handler))
        .with_state(Arc::new(config))
}

/// Binds `addr` and serves the dashboard until the process stops.
pub async fn serve(addr: SocketAddr, config: DashboardConfig) -> std::io::Result<()> {
    let app = build_router(config);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Serving dashboard on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await
}

async fn rerun(
    config: Arc<DashboardConfig>,
    query: WidgetQuery,
) -> Result<Dashboard, DashboardError> {
    let state = DashboardState::for_month(query.month)?;
    let table = WeatherDataLoader::new(&config.data_path)
        .load_async(config.cities())
        .await?;
    tokio::task::spawn_blocking(move || render(&table, &state, &config))
        .await
        .map_err(WeatherDataError::from)?
}

fn status_for(err: &DashboardError) -> StatusCode {
    match err.class() {
        ErrorClass::InvalidInput => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn log_failure(err: &DashboardError) {
    match err.class() {
        ErrorClass::InvalidInput => warn!("Rejected request: {}", err),
        _ => error!("Dashboard run failed: {}", err),
    }
}

async fn page_handler(
    State(config): State<Arc<DashboardConfig>>,
    Query(query): Query<WidgetQuery>,
) -> Response {
    let page = rerun(config, query)
        .await
        .and_then(|dashboard| Ok(dashboard.to_html()?));
    match page {
        Ok(page) => Html(page).into_response(),
        Err(err) => {
            log_failure(&err);
            (status_for(&err), Html(render_error_page(&err))).into_response()
        }
    }
}

async fn json_handler(
    State(config): State<Arc<DashboardConfig>>,
    Query(query): Query<WidgetQuery>,
) -> Response {
    match rerun(config, query).await {
        Ok(dashboard) => Json(dashboard).into_response(),
        Err(err) => {
            log_failure(&err);
            let body = json!({ "error": err.to_string() });
            (status_for(&err), Json(body)).into_response()
        }
    }
}

async fn health_handler() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather_data::data_loader::tests::{sample_rows, write_csv};
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    async fn get_body(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), 10_000_000)
            .await
            .unwrap();
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let app = build_router(DashboardConfig::default());
        let (status, body) = get_body(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn page_renders_with_requested_month() {
        let file = write_csv(&sample_rows());
        let app = build_router(DashboardConfig::builder().data_path(file.path()).build());
        let (status, body) = get_body(app, "/?month=5").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h1>A simple Weather Dashboard</h1>"));
        assert!(body.contains("value=\"5\""));
    }

    #[tokio::test]
    async fn json_carries_month_and_elements() {
        let file = write_csv(&sample_rows());
        let app = build_router(DashboardConfig::builder().data_path(file.path()).build());
        let (status, body) = get_body(app, "/api/dashboard?month=12").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["month"], 12);
        assert!(json["elements"].as_array().is_some_and(|e| !e.is_empty()));
    }

    #[tokio::test]
    async fn out_of_range_month_is_bad_request() {
        let file = write_csv(&sample_rows());
        let app = build_router(DashboardConfig::builder().data_path(file.path()).build());
        let (status, body) = get_body(app, "/?month=13").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Month 13 is outside 1..=12"));
    }

    #[tokio::test]
    async fn missing_data_file_is_error_page() {
        let app = build_router(
            DashboardConfig::builder()
                .data_path("does/not/exist.csv")
                .build(),
        );
        let (status, body) = get_body(app, "/").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("<pre class=\"error\">"));
        assert!(body.contains("Caused by:"));
    }
}
