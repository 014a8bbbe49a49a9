use crate::infra::AppState;
use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde_json::json;
use workforce_dashboard::error::AppError;
use workforce_dashboard::grid::GridRequest;
use workforce_dashboard::stats::StatsSummary;
use workforce_dashboard::{ColumnSet, DashboardSnapshot, EXPORT_FILE_NAME};

type QueryParams = Vec<(String, String)>;

pub(crate) fn dashboard_router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/dashboard", get(dashboard_endpoint))
        .route("/api/v1/dashboard/stats", get(stats_endpoint))
        .route("/api/v1/dashboard/columns", get(columns_endpoint))
        .route("/api/v1/dashboard/export", get(export_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

fn grid_request(columns: &ColumnSet, params: &QueryParams) -> Result<GridRequest, AppError> {
    let pairs = params.iter().map(|(key, value)| (key.as_str(), value.as_str()));
    Ok(GridRequest::from_params(pairs, columns)?)
}

pub(crate) async fn dashboard_endpoint(
    Extension(state): Extension<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<DashboardSnapshot>, AppError> {
    let request = grid_request(state.dashboard.columns(), &params)?;
    let dashboard = state.dashboard.dashboard(request.query)?;
    Ok(Json(dashboard.snapshot(request.page)?))
}

pub(crate) async fn stats_endpoint(
    Extension(state): Extension<AppState>,
) -> Result<Json<StatsSummary>, AppError> {
    let dashboard = state.dashboard.dashboard(Default::default())?;
    Ok(Json(dashboard.stats().summary()))
}

pub(crate) async fn columns_endpoint(Extension(state): Extension<AppState>) -> Json<ColumnSet> {
    Json(state.dashboard.columns().clone())
}

/// Every row matching the query, ignoring `page`.
pub(crate) async fn export_endpoint(
    Extension(state): Extension<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<impl IntoResponse, AppError> {
    let request = grid_request(state.dashboard.columns(), &params)?;
    let dashboard = state.dashboard.dashboard(request.query)?;

    let mut body = Vec::new();
    dashboard.export_csv(&mut body)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        body,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::DashboardState;
    use axum::body::Body;
    use axum::http::Request;
    use axum::response::Response;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::Value;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;
    use workforce_dashboard::EmployeeRoster;

    fn test_state(ready: bool) -> AppState {
        let roster = EmployeeRoster::sample().expect("sample roster parses");
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            dashboard: DashboardState::new(roster, 10),
        }
    }

    fn router(state: AppState) -> Router {
        dashboard_router().layer(Extension(state))
    }

    async fn get_response(state: AppState, uri: &str) -> Response {
        router(state)
            .oneshot(
                Request::get(uri)
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds")
    }

    async fn read_body(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), 1 << 20)
            .await
            .expect("read body")
            .to_vec()
    }

    async fn read_json_body(response: Response) -> Value {
        serde_json::from_slice(&read_body(response).await).expect("json payload")
    }

    #[tokio::test]
    async fn readiness_reflects_flag() {
        let response = get_response(test_state(false), "/ready").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = get_response(test_state(true), "/ready").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json_body(response).await["status"], "ready");
    }

    #[tokio::test]
    async fn dashboard_returns_first_page_and_cards() {
        let response = get_response(test_state(true), "/api/v1/dashboard").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json_body(response).await;
        assert_eq!(body["title"], "Employee Dashboard");
        assert_eq!(body["page"]["page"], 1);
        assert_eq!(body["page"]["total_rows"], 30);
        assert_eq!(body["page"]["total_pages"], 3);
        assert_eq!(body["page"]["rows"].as_array().map(Vec::len), Some(10));
        assert_eq!(body["stats"]["total"], 30);
        assert_eq!(body["stats"]["avg_rating_label"], "3.8");
        assert_eq!(body["stats"]["cards"][2]["value"], "$106,000");
    }

    #[tokio::test]
    async fn dashboard_applies_search_filter_and_sort() {
        let uri = "/api/v1/dashboard?filter.department=Engineering&sort=salary:desc";
        let body = read_json_body(get_response(test_state(true), uri).await).await;
        assert_eq!(body["page"]["total_rows"], 5);
        assert_eq!(body["sort"], "salary:desc");
        assert_eq!(body["page"]["rows"][0][0]["text"], "8");

        let body =
            read_json_body(get_response(test_state(true), "/api/v1/dashboard?search=okafor").await)
                .await;
        assert_eq!(body["page"]["total_rows"], 1);
        assert_eq!(body["search"], "okafor");
    }

    #[tokio::test]
    async fn dashboard_rejects_bad_queries() {
        for uri in [
            "/api/v1/dashboard?sort=skills",
            "/api/v1/dashboard?filter.salary=gt:lots",
            "/api/v1/dashboard?page=0",
        ] {
            let response = get_response(test_state(true), uri).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
            assert!(read_json_body(response).await["error"].is_string());
        }
    }

    #[tokio::test]
    async fn stats_are_computed_once_across_requests() {
        let state = test_state(true);
        for _ in 0..3 {
            let response = get_response(state.clone(), "/api/v1/dashboard/stats").await;
            assert_eq!(response.status(), StatusCode::OK);
        }
        assert_eq!(state.dashboard.stats_computations(), 1);
    }

    #[tokio::test]
    async fn columns_describe_the_table() {
        let body =
            read_json_body(get_response(test_state(true), "/api/v1/dashboard/columns").await)
                .await;
        let columns = body.as_array().expect("column list");
        assert_eq!(columns.len(), 15);
        assert_eq!(columns[0]["field"], "id");
        assert_eq!(columns[0]["pinned"], "left");
    }

    #[tokio::test]
    async fn export_downloads_filtered_rows_as_csv() {
        let uri = "/api/v1/dashboard/export?filter.department=Engineering&page=2";
        let response = get_response(test_state(true), uri).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"employees.csv\""
        );
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .expect("ascii header")
            .starts_with("text/csv"));

        let body = String::from_utf8(read_body(response).await).expect("utf8 csv");
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("Id,First Name"));
        assert!(lines[1..].iter().all(|line| line.contains(",Engineering,")));
    }
}
