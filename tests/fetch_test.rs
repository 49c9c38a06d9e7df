mod common;

use std::collections::HashMap;
use std::net::SocketAddr;

use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use common::build_pdf;
use lesson_splitter::error::{ConfigError, NetworkError, SourceError};
use lesson_splitter::services::{load_from_bytes, FetchOptions, PdfFetcher};
use lesson_splitter::{App, AppError, Command, Config, SourceOrigin};
use tokio_test::{assert_err, assert_ok};

async fn book() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/pdf")], build_pdf(3))
}

async fn html() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], "<html></html>")
}

/// 模拟代理：只转发到本服务的 /book.pdf
async fn relay(Query(params): Query<HashMap<String, String>>) -> axum::response::Response {
    match params.get("url") {
        Some(url) if url.ends_with("/book.pdf?v=1") => book().await.into_response(),
        _ => StatusCode::BAD_REQUEST.into_response(),
    }
}

async fn serve() -> SocketAddr {
    let app = Router::new()
        .route("/book.pdf", get(book))
        .route("/page.html", get(html))
        .route("/missing.pdf", get(|| async { StatusCode::NOT_FOUND }))
        .route("/secret.pdf", get(|| async { StatusCode::FORBIDDEN }))
        .route("/broken.pdf", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .route("/relay", get(relay));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// 一个当前无人监听的本地地址
async fn closed_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

fn direct() -> FetchOptions {
    FetchOptions::default()
}

#[tokio::test]
async fn test_fetch_reports_progress() {
    let addr = serve().await;
    let fetcher = PdfFetcher::with_proxies(Vec::new());

    let mut reports = Vec::new();
    let fetched = assert_ok!(
        fetcher
            .fetch(&format!("http://{}/book.pdf", addr), direct(), |p| reports.push(p))
            .await
    );

    assert_eq!(fetched.file_name, "book.pdf");
    let last = reports.last().unwrap();
    assert_eq!(last.loaded, fetched.bytes.len() as u64);
    assert_eq!(last.total, fetched.bytes.len() as u64);
    assert_eq!(last.percentage, 100);
    assert!(reports.windows(2).all(|w| w[0].loaded <= w[1].loaded));

    let source = assert_ok!(load_from_bytes(
        fetched.file_name,
        fetched.bytes,
        SourceOrigin::Memory
    ));
    assert_eq!(source.page_count(), 3);
}

#[tokio::test]
async fn test_fetch_status_errors() {
    let addr = serve().await;
    let fetcher = PdfFetcher::with_proxies(Vec::new());

    let err = assert_err!(
        fetcher
            .fetch(&format!("http://{}/missing.pdf", addr), direct(), |_| {})
            .await
    );
    assert!(matches!(err, AppError::Network(NetworkError::NotFound { .. })));

    let err = assert_err!(
        fetcher
            .fetch(&format!("http://{}/secret.pdf", addr), direct(), |_| {})
            .await
    );
    assert!(matches!(err, AppError::Network(NetworkError::AccessDenied { .. })));

    let err = assert_err!(
        fetcher
            .fetch(&format!("http://{}/broken.pdf", addr), direct(), |_| {})
            .await
    );
    assert!(matches!(
        err,
        AppError::Network(NetworkError::HttpStatus { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_fetch_rejects_non_pdf() {
    let addr = serve().await;
    let fetcher = PdfFetcher::with_proxies(Vec::new());

    let err = assert_err!(
        fetcher
            .fetch(&format!("http://{}/page.html", addr), direct(), |_| {})
            .await
    );
    assert!(matches!(
        err,
        AppError::InvalidSource(SourceError::NotPdf { .. })
    ));
}

#[tokio::test]
async fn test_fetch_invalid_url() {
    let fetcher = PdfFetcher::with_proxies(Vec::new());
    let err = assert_err!(fetcher.fetch("not a url", direct(), |_| {}).await);
    assert!(matches!(err, AppError::Network(NetworkError::InvalidUrl { .. })));
}

#[tokio::test]
async fn test_unreachable_without_proxy_is_cross_origin() {
    let addr = closed_addr().await;
    let fetcher = PdfFetcher::with_proxies(Vec::new());

    let err = assert_err!(
        fetcher
            .fetch(&format!("http://{}/book.pdf", addr), direct(), |_| {})
            .await
    );
    assert!(err.is_cross_origin_blocked());
}

#[tokio::test]
async fn test_fetch_through_proxy() {
    let addr = serve().await;
    let fetcher = PdfFetcher::with_proxies(vec![
        "http://127.0.0.1:1/unused?u=".to_string(),
        format!("http://{}/relay?url=", addr),
    ]);
    let options = FetchOptions {
        use_proxy: true,
        proxy_index: 1,
    };

    let fetched = assert_ok!(
        fetcher
            .fetch("https://library.test/book.pdf?v=1", options, |_| {})
            .await
    );
    assert_eq!(fetched.file_name, "book.pdf");
    assert!(fetched.bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_proxy_failures() {
    let addr = closed_addr().await;
    let fetcher = PdfFetcher::with_proxies(vec![format!("http://{}/relay?url=", addr)]);

    let options = FetchOptions {
        use_proxy: true,
        proxy_index: 0,
    };
    let err = assert_err!(
        fetcher
            .fetch("https://library.test/book.pdf", options, |_| {})
            .await
    );
    assert!(matches!(err, AppError::Network(NetworkError::ProxyFailed { .. })));

    let options = FetchOptions {
        use_proxy: true,
        proxy_index: 3,
    };
    let err = assert_err!(
        fetcher
            .fetch("https://library.test/book.pdf", options, |_| {})
            .await
    );
    assert!(matches!(
        err,
        AppError::Config(ConfigError::ProxyIndexOutOfRange {
            index: 3,
            available: 1
        })
    ));
}

#[tokio::test]
async fn test_app_opens_url() {
    let addr = serve().await;
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        output_dir: dir.path().display().to_string(),
        cors_proxies: vec![format!("http://{}/relay?url=", addr)],
        ..Config::default()
    };
    let mut app = App::initialize(config).await.unwrap();

    assert_ok!(
        app.execute(Command::Open(format!("http://{}/book.pdf", addr)))
            .await
    );
    let source = app.session().source().unwrap();
    assert_eq!(source.name(), "book.pdf");
    assert_eq!(source.page_count(), 3);
    assert!(matches!(source.origin(), SourceOrigin::Url(_)));

    assert_ok!(app.execute(Command::Proxy(true)).await);
    assert_ok!(
        app.execute(Command::Open("https://library.test/book.pdf?v=1".into()))
            .await
    );
    assert_eq!(app.session().page_count(), 3);
}
