//! API router.
//!
//! Returns a composable `Router` with all endpoints nested under `/api/`.
//! CORS is permissive: the browser UI is served separately and the API
//! carries no credentials.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::state::AppState;

/// Build the API router for the given application state.
pub fn api_router(state: Arc<AppState>) -> Router {
    let ctx = ApiContext::new(state);

    let routes = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/extract", post(endpoints::extract::extract))
        .route("/resolve", post(endpoints::resolve::resolve))
        .route("/help", post(endpoints::help::generate))
        .route(
            "/review",
            post(endpoints::review::submit).get(endpoints::review::list),
        )
        .with_state(ctx);

    Router::new()
        .nest("/api", routes)
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::inference::ollama::MockInferenceClient;
    use crate::registry::StaticRegistry;

    fn router_with_mock(mock: MockInferenceClient) -> Router {
        let state = AppState::with_parts(
            Arc::new(mock),
            Arc::new(StaticRegistry::with_demo_products()),
        );
        api_router(Arc::new(state))
    }

    fn json_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_version_and_probe() {
        let router = router_with_mock(MockInferenceClient::always("{}"));
        let response = router
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], crate::config::APP_VERSION);
        assert_eq!(json["inference_reachable"], true);
    }

    #[tokio::test]
    async fn resolve_registry_hit_without_touching_inference() {
        let router = router_with_mock(MockInferenceClient::unreachable());
        let response = router
            .oneshot(json_request(
                "/api/resolve",
                r#"{"serial_number": "SN12345XYZ"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "found");
        assert_eq!(json["source"], "registry");
        assert_eq!(json["product"]["name"], "QuantumCore X1 Motherboard");
        assert_eq!(json["product"]["identifier"], "SN12345XYZ");
    }

    #[tokio::test]
    async fn resolve_unknown_serial_without_file_is_no_information() {
        let router = router_with_mock(MockInferenceClient::always(
            r#"{"found": false, "reasoning": "nothing credible"}"#,
        ));
        let response = router
            .oneshot(json_request(
                "/api/resolve",
                r#"{"serial_number": "UNKNOWN000"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "not_found");
        assert_eq!(json["reason"], "no_information");
    }

    #[tokio::test]
    async fn resolve_rejects_empty_serial() {
        let router = router_with_mock(MockInferenceClient::always("{}"));
        let response = router
            .oneshot(json_request("/api/resolve", r#"{"serial_number": "  "}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn extract_returns_candidates() {
        let router = router_with_mock(MockInferenceClient::always(
            r#"{"serial_numbers": ["SN12345XYZ", "MB67890ABC"]}"#,
        ));
        let response = router
            .oneshot(json_request(
                "/api/extract",
                r#"{"file": "data:image/jpeg;base64,/9j/4AAQ"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["serial_numbers"][0], "SN12345XYZ");
        assert_eq!(json["serial_numbers"][1], "MB67890ABC");
    }

    #[tokio::test]
    async fn extract_rejects_malformed_upload() {
        let router = router_with_mock(MockInferenceClient::always("{}"));
        let response = router
            .oneshot(json_request(
                "/api/extract",
                r#"{"file": "not-a-data-uri"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn extract_degrades_when_inference_is_down() {
        let router = router_with_mock(MockInferenceClient::unreachable());
        let response = router
            .oneshot(json_request(
                "/api/extract",
                r#"{"file": "data:image/jpeg;base64,/9j/4AAQ"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "EXTRACTION_UNAVAILABLE");
    }

    #[tokio::test]
    async fn help_round_trip() {
        let router = router_with_mock(MockInferenceClient::always(
            r#"{"help_text": "Take a clear photo of the label."}"#,
        ));
        let response = router
            .oneshot(json_request(
                "/api/help",
                r#"{"step_description": "Upload a photo"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["help_text"], "Take a clear photo of the label.");
    }

    #[tokio::test]
    async fn review_submit_then_list() {
        let state = Arc::new(AppState::with_parts(
            Arc::new(MockInferenceClient::always("{}")),
            Arc::new(StaticRegistry::with_demo_products()),
        ));
        let router = api_router(state.clone());

        let response = router
            .clone()
            .oneshot(json_request(
                "/api/review",
                r#"{"serial_number": "UNKNOWN000", "note": "label scratched"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(json["ticket_id"].is_string());

        let response = router
            .oneshot(Request::get("/api/review").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["tickets"][0]["serial_number"], "UNKNOWN000");
        assert_eq!(state.review.len(), 1);
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let router = router_with_mock(MockInferenceClient::always("{}"));
        let response = router
            .oneshot(Request::get("/api/missing").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
