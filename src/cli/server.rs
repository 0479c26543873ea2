//! HTTP server mode for JSON access to collected tenders

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::collector::TenderCollector;
use crate::config::ScraperConfig;
use crate::error::{Error, Result};
use crate::types::TenderRow;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    /// Address string passed to the listener
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// App state shared across handlers
struct AppState {
    collector: TenderCollector,
}

/// Query parameters for `GET /tenders`
#[derive(Debug, Default, Deserialize)]
struct TendersQuery {
    /// Record count for this request; absent or 0 uses `count_tenders`
    #[serde(default)]
    max: Option<usize>,
}

/// Build the API router around a collector
pub fn router(collector: TenderCollector) -> Router {
    let state = AppState { collector };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/tenders", get(list_tenders))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Start the HTTP server
pub async fn serve(config: ScraperConfig, server: ServerConfig) -> Result<()> {
    let collector = TenderCollector::from_config(&config)?;
    let app = router(collector);

    let addr = server.addr();
    tracing::info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to {addr}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    Ok(())
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Run one collection and return the records
///
/// Always 200: an early stop returns whatever was collected.
async fn list_tenders(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TendersQuery>,
) -> Response {
    let target = match query.max {
        Some(max) if max > 0 => max,
        _ => state.collector.config().count_tenders,
    };

    let report = state.collector.collect(target).await;
    if report.stats.stop_reason.is_early() {
        tracing::warn!(
            "Request served partial result ({}): {} tenders",
            report.stats.stop_reason,
            report.records.len()
        );
    }

    let rows: Vec<TenderRow<'_>> = report.records.iter().map(|r| r.to_row()).collect();
    Json(rows).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PAGE_ONE: &str = r#"<html><body>
        <article class="tender-row row" id="1">
          <span class="tender__number">№101</span>
          <a class="description" href="/tender/101">Первый</a>
          <div class="starting-price__price">1 000 ₽</div>
        </article>
        <article class="tender-row row" id="2">
          <span class="tender__number">№102</span>
          <a class="description" href="/tender/102">Второй</a>
        </article>
    </body></html>"#;

    async fn source() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/extsearch"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAGE_ONE))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/extsearch"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;
        server
    }

    fn app_for(server: &MockServer, count: usize) -> Router {
        let config = ScraperConfig::default()
            .with_base_url(format!("{}/extsearch", server.uri()))
            .with_count(count);
        router(TenderCollector::from_config(&config).unwrap())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let server = source().await;
        let (status, body) = get_json(app_for(&server, 10), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_tenders_returns_rows() {
        let server = source().await;
        let (status, body) = get_json(app_for(&server, 10), "/tenders").await;

        assert_eq!(status, StatusCode::OK);
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["tender_id"], "101");
        assert_eq!(rows[0]["title"], "Первый");
        assert_eq!(rows[0]["url"], format!("{}/tender/101", server.uri()));
        assert_eq!(rows[0]["starting_price"], "1000");
        assert_eq!(rows[0]["categories"], json!([]));
        assert_eq!(rows[1]["starting_price"], "-");
    }

    #[tokio::test]
    async fn test_tenders_max_override() {
        let server = source().await;
        let (_, body) = get_json(app_for(&server, 10), "/tenders?max=1").await;

        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["tender_id"], "101");
    }

    #[tokio::test]
    async fn test_tenders_zero_max_uses_default() {
        let server = source().await;
        let (_, body) = get_json(app_for(&server, 1), "/tenders?max=0").await;

        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_tenders_source_failure_is_ok_and_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let (status, body) = get_json(app_for(&server, 5), "/tenders").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[test]
    fn test_server_config_addr() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 9000,
        };
        assert_eq!(config.addr(), "0.0.0.0:9000");
        assert_eq!(ServerConfig::default().addr(), "127.0.0.1:8000");
    }
}
