use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::dashboard::{Dashboard, Threshold};

const INDEX_HTML: &str = include_str!("../assets/index.html");

#[derive(Debug, Deserialize)]
struct ChartQuery {
    min: Option<f64>,
}

/// The request handler for the web dashboard.  Mount it directly or nest it
/// under another server's router.
pub fn router(dashboard: Arc<Dashboard>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/api/slider", get(slider))
        .route("/api/chart", get(chart))
        .with_state(dashboard)
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(dashboard: Arc<Dashboard>, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    log::info!("serving dashboard on http://{}", listener.local_addr()?);
    axum::serve(listener, router(dashboard))
        .await
        .context("http server stopped")
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn slider(State(dashboard): State<Arc<Dashboard>>) -> impl IntoResponse {
    Json(dashboard.range().clone())
}

async fn chart(
    State(dashboard): State<Arc<Dashboard>>,
    Query(query): Query<ChartQuery>,
) -> Response {
    let value = query.min.unwrap_or(dashboard.range().default);
    let Some(threshold) = Threshold::new(value) else {
        return (StatusCode::BAD_REQUEST, "min must be a finite number").into_response();
    };
    log::debug!("chart requested for threshold {threshold}");
    Json(dashboard.chart(threshold)).into_response()
}

#[cfg(test)]
mod tests {
    use axum::{body, body::Body, http::Request};
    use tower::ServiceExt;

    use super::*;
    use crate::chart::ChartSpec;
    use crate::dashboard::{SliderRange, DEFAULT_TOP_N};
    use crate::data::model::{CleaningReport, Record};
    use crate::data::CleanedTable;

    fn test_app() -> Router {
        app_over(&[("IZMIR", 4.4), ("IZMIR", 5.1), ("VAN", 6.3), ("MUGLA", 4.0)])
    }

    fn app_over(entries: &[(&str, f64)]) -> Router {
        let records = entries
            .iter()
            .map(|&(city, magnitude)| Record {
                date: "2022-11-23".into(),
                latitude: 40.8,
                longitude: 31.0,
                depth: 9.0,
                magnitude,
                location: format!("BOLGE ({city})"),
                city: city.into(),
            })
            .collect();
        let table = Arc::new(CleanedTable::new(records, CleaningReport::default()));
        router(Arc::new(Dashboard::new(table, DEFAULT_TOP_N)))
    }

    async fn get_body(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::get(uri).body(Body::empty()).expect("request");
        let response = app.oneshot(request).await.expect("response");
        let status = response.status();
        let body = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn healthz_reports_ok() {
        let (status, body) = get_body(test_app(), "/healthz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"ok");
    }

    #[tokio::test]
    async fn index_serves_the_page() {
        let (status, body) = get_body(test_app(), "/").await;
        assert_eq!(status, StatusCode::OK);
        let page = String::from_utf8(body).unwrap();
        assert!(page.contains("/api/chart"));
        assert!(page.contains("(m - range.min) / span"));
    }

    #[tokio::test]
    async fn slider_range_is_derived_from_the_table() {
        let (status, body) = get_body(test_app(), "/api/slider").await;
        assert_eq!(status, StatusCode::OK);
        let range: SliderRange = serde_json::from_slice(&body).expect("json");
        assert_eq!(range.max, 6.3);
        assert_eq!(range.marks, vec![4.0, 5.0, 6.0]);
    }

    #[tokio::test]
    async fn chart_defaults_to_the_slider_minimum() {
        let (status, body) = get_body(test_app(), "/api/chart").await;
        assert_eq!(status, StatusCode::OK);
        let chart: ChartSpec = serde_json::from_slice(&body).expect("json");
        assert_eq!(chart.threshold, 4.0);
        assert_eq!(chart.bars.len(), 3);
        assert_eq!(chart.bars[0].city, "IZMIR");
        assert_eq!(chart.bars[0].count, 2);
    }

    #[tokio::test]
    async fn chart_follows_the_threshold() {
        let (_, body) = get_body(test_app(), "/api/chart?min=5.0").await;
        let chart: ChartSpec = serde_json::from_slice(&body).expect("json");
        let cities: Vec<&str> = chart.bars.iter().map(|b| b.city.as_str()).collect();
        assert_eq!(cities, vec!["IZMIR", "VAN"]);

        let (status, body) = get_body(test_app(), "/api/chart?min=9.5").await;
        assert_eq!(status, StatusCode::OK);
        let chart: ChartSpec = serde_json::from_slice(&body).expect("json");
        assert!(chart.bars.is_empty());
    }

    #[tokio::test]
    async fn off_grid_threshold_is_applied_as_given() {
        let app = app_over(&[("DENIZLI", 4.07)]);
        let (status, body) = get_body(app, "/api/chart?min=4.05").await;
        assert_eq!(status, StatusCode::OK);

        let chart: ChartSpec = serde_json::from_slice(&body).expect("json");
        assert_eq!(chart.threshold, 4.05);
        assert_eq!(chart.title, "4.05+ magnitude earthquakes (top 20 cities)");
        assert_eq!(chart.bars.len(), 1);
        assert_eq!(chart.bars[0].city, "DENIZLI");
    }

    #[tokio::test]
    async fn bad_thresholds_are_rejected() {
        let (status, _) = get_body(test_app(), "/api/chart?min=NaN").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = get_body(test_app(), "/api/chart?min=big").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
