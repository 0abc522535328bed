use axum::http::{HeaderValue, Method, StatusCode};
use axum_test::TestServer;
use onboard::app::build_app;
use onboard::state::AppState;
use serde_json::json;

fn server() -> TestServer {
    TestServer::new(build_app(AppState::fake())).unwrap()
}

#[tokio::test]
async fn health_returns_welcome_payload() {
    let response = server().get("/").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<serde_json::Value>(),
        json!({"message": "Welcome to the API", "status": "healthy"})
    );
}

#[tokio::test]
async fn responses_carry_cors_headers() {
    let response = server()
        .get("/")
        .add_header(
            axum::http::header::ORIGIN,
            HeaderValue::from_static("http://example.com"),
        )
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin"),
        Some(&HeaderValue::from_static("*"))
    );
}

#[tokio::test]
async fn preflight_allows_registered_methods() {
    let response = server()
        .method(Method::OPTIONS, "/auth/register")
        .add_header(
            axum::http::header::ORIGIN,
            HeaderValue::from_static("http://example.com"),
        )
        .add_header(
            axum::http::header::ACCESS_CONTROL_REQUEST_METHOD,
            HeaderValue::from_static("POST"),
        )
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin"),
        Some(&HeaderValue::from_static("*"))
    );
    let allowed = response
        .headers()
        .get("access-control-allow-methods")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(allowed.contains("POST"), "missing POST in {allowed}");
    assert!(allowed.contains("DELETE"), "missing DELETE in {allowed}");
}
