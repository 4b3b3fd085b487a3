// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Wire-level capture tests against a local mock server

use std::sync::Arc;
use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use remora::{Capture, CaptureClient, CaptureConfig, HttpClient, Request, Warning};

const FLUSH: Duration = Duration::from_secs(5);

// 29-byte JSON payload
const USERS_JSON: &str = r#"{"userNames":["John","Jane"]}"#;

fn capture_client(config: CaptureConfig) -> CaptureClient {
    CaptureClient::new(HttpClient::new().unwrap(), Arc::new(Capture::new(config)))
}

async fn mock_users_endpoint() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/foo"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(USERS_JSON, "application/json"))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn wrapped_call_settles_identically_to_unwrapped() {
    let server = mock_users_endpoint().await;
    let url = format!("{}/foo", server.uri());

    let plain = HttpClient::new().unwrap();
    let mut unwrapped = plain.execute(Request::get(&url).unwrap()).await.unwrap();

    let client = capture_client(CaptureConfig::default());
    let mut wrapped = client.execute(Request::get(&url).unwrap()).await.unwrap();

    assert_eq!(wrapped.status_code(), unwrapped.status_code());
    assert_eq!(
        wrapped.bytes().await.unwrap(),
        unwrapped.bytes().await.unwrap()
    );
    assert_eq!(wrapped.content_type(), unwrapped.content_type());
}

#[tokio::test]
async fn exactly_one_breadcrumb_and_one_span_per_call() {
    let server = mock_users_endpoint().await;
    let url = format!("{}/foo", server.uri());

    let client = capture_client(CaptureConfig::default());
    client.execute(Request::get(&url).unwrap()).await.unwrap();
    assert!(client.capture().flush(FLUSH).await);

    let crumbs = client.capture().scope().breadcrumbs();
    let spans = client.capture().replay().spans();
    assert_eq!(crumbs.len(), 1);
    assert_eq!(spans.len(), 1);

    let crumb = &crumbs[0];
    assert_eq!(crumb.category, "fetch");
    assert_eq!(crumb.kind, "http");
    assert_eq!(crumb.data.method, "GET");
    assert_eq!(crumb.data.url, url);
    assert_eq!(crumb.data.status_code, Some(200));
    // mock server stamps an accurate content-length, so the synchronous
    // header path resolves the size for the breadcrumb too
    assert_eq!(crumb.data.response_body_size, Some(29));

    let span = &spans[0];
    assert_eq!(span.op, "resource.fetch");
    assert_eq!(span.description, url);
    assert!(span.end_timestamp >= span.start_timestamp);
    assert_eq!(span.data.method, "GET");
    assert_eq!(span.data.status_code, Some(200));
    assert_eq!(span.data.response.size, Some(29));
}

#[tokio::test]
async fn non_allow_listed_destination_withholds_headers_but_keeps_url() {
    let server = mock_users_endpoint().await;
    let url = format!("{}/foo", server.uri());

    // default config: empty URL allow-list
    let client = capture_client(CaptureConfig::default());
    client.execute(Request::get(&url).unwrap()).await.unwrap();
    assert!(client.capture().flush(FLUSH).await);

    let spans = client.capture().replay().spans();
    let span = &spans[0];

    assert_eq!(span.description, url);
    assert!(span.data.request.headers.is_empty());
    assert!(span.data.response.headers.is_empty());

    let request_warnings = &span.data.request.meta.as_ref().unwrap().warnings;
    let response_warnings = &span.data.response.meta.as_ref().unwrap().warnings;
    assert!(request_warnings.contains(&Warning::UrlSkipped));
    assert!(response_warnings.contains(&Warning::UrlSkipped));
}

#[tokio::test]
async fn allow_listed_destination_captures_allowed_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/submit"))
        .respond_with(ResponseTemplate::new(201).set_body_raw("ok", "text/plain"))
        .mount(&server)
        .await;
    let url = format!("{}/submit", server.uri());

    let config = CaptureConfig::new()
        .allow_header("content-type")
        .allow_url(server.uri());
    let client = capture_client(config);

    let request = Request::post(&url)
        .unwrap()
        .header("content-type", "application/json")
        .body(USERS_JSON);
    client.execute(request).await.unwrap();
    assert!(client.capture().flush(FLUSH).await);

    let spans = client.capture().replay().spans();
    let span = &spans[0];

    assert_eq!(span.data.method, "POST");
    assert_eq!(span.data.status_code, Some(201));
    assert_eq!(span.data.request.size, Some(29));
    assert_eq!(
        span.data.request.headers.get("content-type"),
        Some("application/json")
    );
    assert_eq!(
        span.data.response.headers.get("content-type"),
        Some("text/plain")
    );
    if let Some(meta) = &span.data.request.meta {
        assert!(!meta.warnings.contains(&Warning::UrlSkipped));
    }
}

#[tokio::test]
async fn rejected_call_propagates_error_and_still_records() {
    // nothing listens on the discard port
    let url = "http://127.0.0.1:9/foo";

    let client = capture_client(CaptureConfig::default());
    let result = client
        .execute(Request::get(url).unwrap().timeout(Duration::from_secs(2)))
        .await;

    let err = result.expect_err("connection should be refused");
    assert!(err.is_network());

    assert!(client.capture().flush(FLUSH).await);

    let crumbs = client.capture().scope().breadcrumbs();
    assert_eq!(crumbs.len(), 1);
    assert_eq!(crumbs[0].data.status_code, None);
    assert_eq!(crumbs[0].data.response_body_size, None);
    assert_eq!(crumbs[0].data.url, url);

    let spans = client.capture().replay().spans();
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].data.status_code, None);
    assert_eq!(spans[0].data.response.size, None);
    let warnings = &spans[0].data.response.meta.as_ref().unwrap().warnings;
    assert!(warnings.contains(&Warning::NoResponse));
}

#[tokio::test]
async fn streaming_execution_is_captured_too() {
    let server = mock_users_endpoint().await;
    let url = format!("{}/foo", server.uri());

    let client = capture_client(CaptureConfig::default());
    let mut response = client
        .execute_streaming(Request::get(&url).unwrap())
        .await
        .unwrap();
    let body = response.bytes().await.unwrap();
    assert_eq!(&body[..], USERS_JSON.as_bytes());

    assert!(client.capture().flush(FLUSH).await);
    assert_eq!(client.capture().scope().len(), 1);
    assert_eq!(client.capture().replay().len(), 1);
    assert_eq!(
        client.capture().replay().spans()[0].data.response.size,
        Some(29)
    );
}

#[tokio::test]
async fn install_is_idempotent_and_uninstall_tears_down() {
    // the only test in this binary touching the process-wide slot
    assert!(remora::installed().is_none());

    let first = remora::install(Capture::new(CaptureConfig::default()));
    let second = remora::install(Capture::new(CaptureConfig::new().max_breadcrumbs(1)));
    assert!(Arc::ptr_eq(&first, &second));

    let client = CaptureClient::from_installed(HttpClient::new().unwrap()).unwrap();
    assert!(Arc::ptr_eq(client.capture(), &first));

    let removed = remora::uninstall().unwrap();
    assert!(Arc::ptr_eq(&removed, &first));
    assert!(remora::installed().is_none());
    assert!(CaptureClient::from_installed(HttpClient::new().unwrap()).is_none());
}
