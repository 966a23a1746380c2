use axum::Router;
use axum::routing::get as route_get;
use axum::body::{Body, to_bytes};
use axum::extract::ConnectInfo;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceExt;

use api_catalog::catalog::Catalog;
use api_catalog::config::Args;
use api_catalog::state::AppState;

const SECURITY_HEADERS: [(&str, &str); 5] = [
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("x-xss-protection", "1; mode=block"),
    ("strict-transport-security", "max-age=31536000; includeSubDomains"),
    ("referrer-policy", "no-referrer"),
];

fn test_state(extra: &[&str]) -> Arc<AppState> {
    let args = Args::parse_from(["api-catalog"].iter().chain(extra));
    AppState::new(Catalog::builtin().unwrap(), &args).unwrap()
}

async fn get(router: &Router, path: &str, peer: &str) -> Response {
    let mut request = Request::builder().uri(path).body(Body::empty()).unwrap();
    let addr: SocketAddr = format!("{peer}:40000").parse().unwrap();
    request.extensions_mut().insert(ConnectInfo(addr));
    router.clone().oneshot(request).await.unwrap()
}

async fn body_string(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn assert_security_headers(response: &Response) {
    for (name, value) in SECURITY_HEADERS {
        assert_eq!(response.headers()[name], value, "header {name}");
    }
}

#[tokio::test]
async fn page_renders_then_throttles_same_client() {
    let router = api_catalog::app(test_state(&[]));

    let first = get(&router, "/", "10.1.0.1").await;
    assert_eq!(first.status(), StatusCode::OK);
    assert_security_headers(&first);

    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    let second = get(&router, "/", "10.1.0.1").await;
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(second.headers()[header::RETRY_AFTER], "2");
    assert_security_headers(&second);
    assert!(body_string(second).await.contains("429"));
}

#[tokio::test]
async fn page_lists_total_count() {
    let state = test_state(&[]);
    let count = state.catalog.count();
    let router = api_catalog::app(state);

    let response = get(&router, "/", "10.1.0.2").await;
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));
    let html = body_string(response).await;
    assert!(html.contains(&format!("<strong id=\"total\">{count}</strong>")));
}

#[tokio::test]
async fn other_clients_are_not_throttled() {
    let router = api_catalog::app(test_state(&[]));
    assert_eq!(get(&router, "/", "10.2.0.1").await.status(), StatusCode::OK);
    assert_eq!(get(&router, "/", "10.2.0.2").await.status(), StatusCode::OK);
    assert_eq!(get(&router, "/", "10.2.0.1").await.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn page_and_export_limits_are_independent() {
    let router = api_catalog::app(test_state(&[]));
    assert_eq!(get(&router, "/", "10.3.0.1").await.status(), StatusCode::OK);
    assert_eq!(get(&router, "/api-list", "10.3.0.1").await.status(), StatusCode::OK);
    assert_eq!(get(&router, "/api-list", "10.3.0.1").await.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn export_is_consistent_json() {
    let state = test_state(&[]);
    let count = state.catalog.count();
    let router = api_catalog::app(state);

    let response = get(&router, "/api-list", "10.4.0.1").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json; charset=utf-8");
    assert!(response.headers().contains_key(header::ETAG));
    assert_security_headers(&response);

    let body = body_string(response).await;
    let value: serde_json::Value = serde_json::from_str(&body).unwrap();
    let apis = value["apis"].as_array().unwrap();
    assert_eq!(value["total"], apis.len());
    assert_eq!(apis.len(), count);

    let first = apis[0].as_object().unwrap();
    let mut keys: Vec<_> = first.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, ["desc", "icon", "id", "title", "url"]);
}

#[tokio::test]
async fn export_preserves_non_ascii_titles() {
    let router = api_catalog::app(test_state(&[]));
    let body = body_string(get(&router, "/api-list", "10.5.0.1").await).await;
    assert!(body.contains("Türkiye Resmî Tatilleri"));
    assert!(body.contains("Döviz Kurları"));
    assert!(!body.contains("\\u00"));
}

#[tokio::test]
async fn repeated_exports_are_byte_identical() {
    // one accepted request per millisecond, so the second call is past the window
    let router = api_catalog::app(test_state(&["--export-rate-limit", "60000"]));

    let first = body_string(get(&router, "/api-list", "10.6.0.1").await).await;
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    let second = get(&router, "/api-list", "10.6.0.1").await;
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(first, body_string(second).await);
}

#[tokio::test]
async fn health_ignores_throttle_state() {
    let state = test_state(&[]);
    let count = state.catalog.count();
    let router = api_catalog::app(state);

    assert_eq!(get(&router, "/", "10.7.0.1").await.status(), StatusCode::OK);
    assert_eq!(get(&router, "/", "10.7.0.1").await.status(), StatusCode::TOO_MANY_REQUESTS);

    for _ in 0..3 {
        let response = get(&router, "/health", "10.7.0.1").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        assert_security_headers(&response);
        let value: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(value, serde_json::json!({"status": "healthy", "total_apis": count}));
    }
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let router = api_catalog::app(test_state(&[]));
    let response = get(&router, "/nonexistent-path", "10.8.0.1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_security_headers(&response);
    assert!(body_string(response).await.contains("404"));
}

#[tokio::test]
async fn requests_without_peer_address_share_one_identity() {
    let router = api_catalog::app(test_state(&[]));
    let bare = || Request::builder().uri("/").body(Body::empty()).unwrap();

    let first = router.clone().oneshot(bare()).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    let second = router.clone().oneshot(bare()).await.unwrap();
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn matching_if_none_match_gets_not_modified() {
    let router = api_catalog::app(test_state(&["--export-rate-limit", "60000"]));

    let first = get(&router, "/api-list", "10.10.0.1").await;
    let etag = first.headers()[header::ETAG].to_str().unwrap().to_string();
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    let mut request = Request::builder()
        .uri("/api-list")
        .header(header::IF_NONE_MATCH, &etag)
        .body(Body::empty())
        .unwrap();
    let addr: SocketAddr = "10.10.0.1:40000".parse().unwrap();
    request.extensions_mut().insert(ConnectInfo(addr));
    let response = router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
    assert_eq!(response.headers()[header::ETAG], etag.as_str());
    assert_security_headers(&response);
    assert!(body_string(response).await.is_empty());
}

#[tokio::test]
async fn stale_if_none_match_gets_full_body() {
    let router = api_catalog::app(test_state(&[]));
    let mut request = Request::builder()
        .uri("/api-list")
        .header(header::IF_NONE_MATCH, "\"stale\"")
        .body(Body::empty())
        .unwrap();
    let addr: SocketAddr = "10.11.0.1:40000".parse().unwrap();
    request.extensions_mut().insert(ConnectInfo(addr));
    let response = router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("\"apis\""));
}

async fn panicking_handler() -> &'static str {
    panic!("render blew up")
}

#[tokio::test]
async fn handler_panic_renders_error_page_with_headers() {
    let router = api_catalog::with_common_layers(Router::new().route("/boom", route_get(panicking_handler)));

    let response = get(&router, "/boom", "10.12.0.1").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_security_headers(&response);
    assert_eq!(body_string(response).await, api_catalog::error::INTERNAL_ERROR_PAGE);
}
