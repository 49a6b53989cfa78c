// Router tests: the scrape → categorize → download flow over HTTP.
//
// The source page is served by wiremock; the classifier is a stub so these
// tests cover request handling and session gating, not circuit output.

#![cfg(feature = "web")]

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

use tidings::classify::labels::{Category, TopicLabel};
use tidings::classify::traits::TopicClassifier;
use tidings::config::Config;
use tidings::output::table::ResultTable;
use tidings::scrape::client::HeadlineClient;
use tidings::session::SessionStore;
use tidings::web::{build_router, AppState};

/// Labels every title as Science, or fails when told to.
struct StubClassifier {
    fail: bool,
}

#[async_trait]
impl TopicClassifier for StubClassifier {
    async fn classify(&self, titles: &[String]) -> Result<Vec<Category>> {
        if self.fail {
            anyhow::bail!("backend unavailable");
        }
        Ok(vec![Category::Topic(TopicLabel::Science); titles.len()])
    }
}

async fn app_with_page(body: &str, fail: bool) -> (Router, MockServer) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.to_string()))
        .mount(&server)
        .await;

    let scraper = HeadlineClient::new(&server.uri(), "h3").unwrap();
    let state = AppState::new(
        Config::default(),
        scraper,
        Arc::new(StubClassifier { fail }),
    );
    (build_router(state), server)
}

/// Send a request carrying `cookie` (if any). Returns the status, the
/// session cookie the server set (if any), the body text, and the
/// Content-Disposition header.
async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
) -> (StatusCode, Option<String>, String, Option<String>) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(c) = cookie {
        builder = builder.header(header::COOKIE, c);
    }
    let response = app
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string);
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (
        status,
        set_cookie,
        String::from_utf8_lossy(&bytes).to_string(),
        disposition,
    )
}

async fn start_session(app: &Router) -> String {
    let (status, cookie, body, _) = send(app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Scrape Titles"));
    cookie.expect("first visit should set a session cookie")
}

#[tokio::test]
async fn health_is_ok() {
    let (app, _server) = app_with_page("", false).await;
    let (status, _, body, _) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("ok"));
}

#[tokio::test]
async fn fresh_session_has_no_categorize_or_download() {
    let (app, _server) = app_with_page("", false).await;
    let cookie = start_session(&app).await;

    let (_, _, body, _) = send(&app, "GET", "/", Some(&cookie)).await;
    assert!(!body.contains("Categorize Titles"));
    assert!(!body.contains("Download Categorized Titles"));

    let (status, _, _, _) = send(&app, "POST", "/categorize", Some(&cookie)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _, _, _) = send(&app, "GET", "/download", Some(&cookie)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn full_flow_produces_csv_download() {
    let page = "<html><body><h3>Comet spotted</h3><h3>Reef, recovering</h3></body></html>";
    let (app, _server) = app_with_page(page, false).await;
    let cookie = start_session(&app).await;

    let (status, set_cookie, _, _) = send(&app, "POST", "/scrape", Some(&cookie)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert!(set_cookie.is_none(), "valid session should be reused");

    let (_, _, body, _) = send(&app, "GET", "/", Some(&cookie)).await;
    assert!(body.contains("Scraped 2 titles!"));
    assert!(body.contains("Categorize Titles"));
    assert!(!body.contains("Download Categorized Titles"));

    let (status, _, _, _) = send(&app, "POST", "/categorize", Some(&cookie)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let (_, _, body, _) = send(&app, "GET", "/", Some(&cookie)).await;
    assert!(body.contains("<td>Science</td>"));
    assert!(body.contains("Download Categorized Titles as CSV"));

    let (status, _, csv, disposition) = send(&app, "GET", "/download", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        disposition.as_deref(),
        Some("attachment; filename=\"categorized_titles.csv\"")
    );
    let table = ResultTable::from_csv(&csv).unwrap();
    assert_eq!(
        table.titles().collect::<Vec<_>>(),
        vec!["Comet spotted", "Reef, recovering"]
    );
}

#[tokio::test]
async fn empty_scrape_shows_message_and_keeps_categorize_hidden() {
    let (app, _server) = app_with_page("<html><body><h2>none</h2></body></html>", false).await;
    let cookie = start_session(&app).await;

    send(&app, "POST", "/scrape", Some(&cookie)).await;
    let (_, _, body, _) = send(&app, "GET", "/", Some(&cookie)).await;
    assert!(body.contains("No headlines found"));
    assert!(!body.contains("Categorize Titles"));
}

#[tokio::test]
async fn classifier_failure_is_shown_not_downloadable() {
    let (app, _server) = app_with_page("<h3>Only title</h3>", true).await;
    let cookie = start_session(&app).await;

    send(&app, "POST", "/scrape", Some(&cookie)).await;
    let (status, _, _, _) = send(&app, "POST", "/categorize", Some(&cookie)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let (_, _, body, _) = send(&app, "GET", "/", Some(&cookie)).await;
    assert!(body.contains("backend unavailable"));

    let (status, _, _, _) = send(&app, "GET", "/download", Some(&cookie)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn sessions_are_isolated() {
    let (app, _server) = app_with_page("<h3>Shared source</h3>", false).await;
    let alice = start_session(&app).await;
    let bob = start_session(&app).await;
    assert_ne!(alice, bob);

    send(&app, "POST", "/scrape", Some(&alice)).await;

    let (_, _, body, _) = send(&app, "GET", "/api/session", Some(&bob)).await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["can_categorize"], false);

    let (_, _, body, _) = send(&app, "GET", "/api/session", Some(&alice)).await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["can_categorize"], true);
    assert_eq!(json["session"]["titles"][0], "Shared source");
}

#[tokio::test]
async fn tampered_cookie_gets_new_session() {
    let (app, _server) = app_with_page("", false).await;
    let (_, set_cookie, _, _) =
        send(&app, "GET", "/", Some("tidings_session=1.abc.forged")).await;
    assert!(set_cookie.is_some());
}

#[tokio::test]
async fn stylesheet_is_served() {
    let (app, _server) = app_with_page("", false).await;
    let (status, _, body, _) = send(&app, "GET", "/assets/style.css", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("table.results"));
}

#[tokio::test]
async fn expired_sessions_do_not_accumulate() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<h3>Comet spotted</h3>"))
        .mount(&server)
        .await;

    let store = SessionStore::with_ttl(Duration::from_secs(1));
    let mut state = AppState::new(
        Config::default(),
        HeadlineClient::new(&server.uri(), "h3").unwrap(),
        Arc::new(StubClassifier { fail: false }),
    );
    state.sessions = store.clone();
    let app = build_router(state);

    // Cookieless requests each start a new session
    for _ in 0..10 {
        send(&app, "POST", "/scrape", None).await;
    }
    assert_eq!(store.len().await, 10);

    tokio::time::sleep(Duration::from_millis(1200)).await;
    send(&app, "POST", "/scrape", None).await;
    assert_eq!(store.len().await, 1);
}
