//! Integration tests for the HTTP month downloader.
//!
//! These tests run the full manifest and file flow against mock HTTP servers.

use std::path::Path;

use media_archiver::{
    Database, DownloadError, DownloadHistory, HistoryEntry, HttpMonthDownloader, JobRunner,
    MonthDownloader, MonthJob, RunError, ServiceClient, ServiceConfig, SqliteHistory,
};
use serde_json::json;
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_root(server: &MockServer) -> Url {
    Url::parse(&format!("{}/api/", server.uri())).expect("mock server uri")
}

async fn new_history() -> SqliteHistory {
    let db = Database::new_in_memory().await.expect("in-memory db");
    SqliteHistory::new(db)
}

fn downloader(
    server: &MockServer,
    service: &ServiceConfig,
    history: SqliteHistory,
    output_dir: &Path,
) -> HttpMonthDownloader {
    let client = ServiceClient::new(api_root(server), service).expect("client");
    HttpMonthDownloader::new(client, history, output_dir.to_path_buf())
}

async fn mount_file(server: &MockServer, file_path: &str, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(file_path))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
        .mount(server)
        .await;
}

/// July 2025 spread over two manifest pages, one item each.
async fn mount_two_page_july(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/months/2025/07"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"id": "p1", "url": "/media/p1.jpg", "taken_at": "2025-07-03T10:00:00", "filename": "beach.jpg"}
            ],
            "next": "/api/months/2025/07/page/2"
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/months/2025/07/page/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"id": "p2", "url": "/media/p2.jpg"}
            ]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_download_month_follows_pagination_and_saves_files() {
    let server = MockServer::start().await;
    mount_two_page_july(&server).await;
    mount_file(&server, "/media/p1.jpg", b"first photo").await;
    mount_file(&server, "/media/p2.jpg", b"second photo").await;

    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let history = new_history().await;
    let downloader = downloader(
        &server,
        &ServiceConfig::default(),
        history.clone(),
        temp_dir.path(),
    );

    let downloaded = downloader.download_month(2025, 7).await.unwrap();

    assert_eq!(downloaded, 2);
    let month_dir = temp_dir.path().join("2025").join("07");
    assert_eq!(
        std::fs::read(month_dir.join("p1_beach.jpg")).unwrap(),
        b"first photo"
    );
    assert_eq!(
        std::fs::read(month_dir.join("p2_p2.jpg")).unwrap(),
        b"second photo"
    );
    assert!(
        !month_dir.join("p1_beach.jpg.part").exists(),
        "partial file should be renamed away"
    );
    assert!(history.contains("p1").await.unwrap());
    assert!(history.contains("p2").await.unwrap());
    assert!(history.latest_timestamp().await.unwrap().is_some());
}

#[tokio::test]
async fn test_download_month_skips_items_already_in_history() {
    let server = MockServer::start().await;
    mount_two_page_july(&server).await;
    Mock::given(method("GET"))
        .and(path("/media/p1.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"unused".to_vec()))
        .expect(0)
        .mount(&server)
        .await;
    mount_file(&server, "/media/p2.jpg", b"second photo").await;

    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let history = new_history().await;
    history
        .record(&HistoryEntry {
            item_id: "p1",
            month: MonthJob::new(2025, 7).unwrap(),
            taken_at: None,
            file_path: "earlier/p1_beach.jpg",
            downloaded_at: chrono::NaiveDate::from_ymd_opt(2025, 7, 20)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
        })
        .await
        .unwrap();

    let downloader = downloader(&server, &ServiceConfig::default(), history, temp_dir.path());
    let downloaded = downloader.download_month(2025, 7).await.unwrap();

    assert_eq!(downloaded, 1, "only the new item should count");
    assert!(!temp_dir.path().join("2025/07/p1_beach.jpg").exists());
    assert!(temp_dir.path().join("2025/07/p2_p2.jpg").exists());
}

#[tokio::test]
async fn test_force_mode_downloads_items_already_in_history() {
    let server = MockServer::start().await;
    mount_two_page_july(&server).await;
    mount_file(&server, "/media/p1.jpg", b"first photo").await;
    mount_file(&server, "/media/p2.jpg", b"second photo").await;

    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let history = new_history().await;
    let first = downloader(
        &server,
        &ServiceConfig::default(),
        history.clone(),
        temp_dir.path(),
    );
    assert_eq!(first.download_month(2025, 7).await.unwrap(), 2);

    let second = downloader(
        &server,
        &ServiceConfig::default(),
        history.clone(),
        temp_dir.path(),
    );
    assert_eq!(second.download_month(2025, 7).await.unwrap(), 0);

    let forced = downloader(&server, &ServiceConfig::default(), history, temp_dir.path())
        .with_force(true);
    assert!(forced.is_force());
    assert_eq!(forced.download_month(2025, 7).await.unwrap(), 2);
}

#[tokio::test]
async fn test_empty_month_creates_directory_and_returns_zero() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/months/2024/12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let downloader = downloader(
        &server,
        &ServiceConfig::default(),
        new_history().await,
        temp_dir.path(),
    );

    assert_eq!(downloader.download_month(2024, 12).await.unwrap(), 0);
    assert!(temp_dir.path().join("2024").join("12").is_dir());
}

#[tokio::test]
async fn test_server_error_is_reported_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/months/2025/07"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let downloader = downloader(
        &server,
        &ServiceConfig::default(),
        new_history().await,
        temp_dir.path(),
    );

    let err = downloader.download_month(2025, 7).await.unwrap_err();
    assert!(
        matches!(err, DownloadError::HttpStatus { status: 500, .. }),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn test_rejected_credentials_are_reported_as_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/months/2025/07"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let downloader = downloader(
        &server,
        &ServiceConfig::default(),
        new_history().await,
        temp_dir.path(),
    );

    let err = downloader.download_month(2025, 7).await.unwrap_err();
    assert!(matches!(err, DownloadError::AuthRequired { status: 401, .. }));
    assert!(err.to_string().contains("api_token"));
}

#[tokio::test]
async fn test_api_token_is_sent_as_bearer_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/months/2025/07"))
        .and(header("authorization", "Bearer s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(1)
        .mount(&server)
        .await;

    let service = ServiceConfig {
        api_token: Some("s3cret".to_string()),
        ..ServiceConfig::default()
    };
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let downloader = downloader(&server, &service, new_history().await, temp_dir.path());

    assert_eq!(downloader.download_month(2025, 7).await.unwrap(), 0);
}

#[tokio::test]
async fn test_malformed_manifest_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/months/2025/07"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let downloader = downloader(
        &server,
        &ServiceConfig::default(),
        new_history().await,
        temp_dir.path(),
    );

    let err = downloader.download_month(2025, 7).await.unwrap_err();
    assert!(matches!(err, DownloadError::InvalidManifest { .. }));
}

#[tokio::test]
async fn test_runner_stops_at_first_failing_month() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/months/2025/07"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": "j1", "url": "/media/j1.jpg"}]
        })))
        .mount(&server)
        .await;
    mount_file(&server, "/media/j1.jpg", b"july").await;
    Mock::given(method("GET"))
        .and(path("/api/months/2025/08"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/months/2025/09"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(0)
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let downloader = downloader(
        &server,
        &ServiceConfig::default(),
        new_history().await,
        temp_dir.path(),
    );
    let jobs = [
        MonthJob::new(2025, 7).unwrap(),
        MonthJob::new(2025, 8).unwrap(),
        MonthJob::new(2025, 9).unwrap(),
    ];

    let err = JobRunner::new(&downloader).run(&jobs).await.unwrap_err();

    let RunError::Download { job, source } = err;
    assert_eq!(job, MonthJob::new(2025, 8).unwrap());
    assert!(matches!(source, DownloadError::HttpStatus { status: 503, .. }));
    assert!(temp_dir.path().join("2025/07/j1_j1.jpg").exists());
}

#[tokio::test]
async fn test_runner_sums_months() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/months/2025/12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"id": "d1", "url": "/media/d1.jpg"},
                {"id": "d2", "url": "/media/d2.jpg"}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/months/2026/01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": "n1", "url": "/media/n1.jpg"}]
        })))
        .mount(&server)
        .await;
    for file in ["/media/d1.jpg", "/media/d2.jpg", "/media/n1.jpg"] {
        mount_file(&server, file, b"bytes").await;
    }

    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let downloader = downloader(
        &server,
        &ServiceConfig::default(),
        new_history().await,
        temp_dir.path(),
    );
    let jobs = [MonthJob::new(2025, 12).unwrap(), MonthJob::new(2026, 1).unwrap()];

    let summary = JobRunner::new(&downloader).run(&jobs).await.unwrap();

    assert_eq!(summary.total(), 3);
    assert_eq!(summary.months().len(), 2);
    assert_eq!(summary.months()[0].downloaded, 2);
    assert!(temp_dir.path().join("2026/01/n1_n1.jpg").exists());
}
