//! Fallback provider integration tests against a mocked HTML endpoint

use search_bridge::config::{Credentials, ProvidersSettings};
use search_bridge::network::HttpClient;
use search_bridge::{ProviderKind, ProviderRegistry, Search, SearchError, SearchOptions};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_test::{assert_err, assert_ok};
use wiremock::{
    matchers::{header_exists, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

const PAGE: &str = include_str!("fixtures/duckduckgo/page.html");

fn registry(server: &MockServer, client: HttpClient) -> ProviderRegistry {
    let urls = ProvidersSettings {
        duckduckgo_url: format!("{}/html/", server.uri()),
        ..Default::default()
    };
    ProviderRegistry::new(Credentials::none(), &urls, client)
}

#[tokio::test]
async fn test_end_to_end_without_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/html/"))
        .and(query_param("q", "rust ownership"))
        .and(header_exists("user-agent"))
        .and(header_exists("accept-language"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let registry = Arc::new(registry(&server, HttpClient::new().unwrap()));
    assert_eq!(registry.select(None).kind(), ProviderKind::DuckDuckGo);

    let options = SearchOptions {
        max_results: Some(3),
        ..Default::default()
    };
    let results = assert_ok!(
        Search::new(registry)
            .search("rust ownership", options, None)
            .await
    );

    assert_eq!(results.query(), "rust ownership");
    assert_eq!(results.number_of_results(), 3);
    assert_eq!(results.results().len(), 3);
    assert!(results.images().is_empty());
    for result in results.results() {
        assert!(!result.title().is_empty());
        assert!(url::Url::parse(result.url()).is_ok());
    }
    assert_eq!(
        results.results()[0].url(),
        "https://doc.rust-lang.org/book/ch04-01-what-is-ownership.html"
    );
    assert_eq!(
        results.results()[2].url(),
        "https://blog.logrocket.com/understanding-ownership-in-rust/"
    );
}

#[tokio::test]
async fn test_serialized_shape() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
        .mount(&server)
        .await;

    let registry = Arc::new(registry(&server, HttpClient::new().unwrap()));
    let options = SearchOptions {
        max_results: Some(1),
        ..Default::default()
    };
    let results = Search::new(registry)
        .search("rust ownership", options, None)
        .await
        .unwrap();

    let json = serde_json::to_value(&results).unwrap();
    assert_eq!(json["query"], "rust ownership");
    assert_eq!(json["number_of_results"], 1);
    assert_eq!(json["images"], serde_json::json!([]));
    assert!(json["results"][0]["content"]
        .as_str()
        .unwrap()
        .starts_with("Ownership is a set of rules"));
}

#[tokio::test]
async fn test_non_success_status_is_network_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let registry = registry(&server, HttpClient::new().unwrap());
    let query = search_bridge::SearchQuery::new("rust").unwrap();
    let err = assert_err!(registry.select(None).search(&query).await);

    assert!(matches!(err, SearchError::Network { status: Some(503), .. }));
}

#[tokio::test]
async fn test_deadline_expiry_is_timeout() {
    let server = MockServer::start().await;
    let delay = Duration::from_secs(3);

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(PAGE)
                .set_delay(delay),
        )
        .mount(&server)
        .await;

    let client = HttpClient::new()
        .unwrap()
        .with_deadline(Duration::from_millis(200));
    let registry = registry(&server, client);
    let query = search_bridge::SearchQuery::new("rust").unwrap();

    let start = Instant::now();
    let err = assert_err!(registry.select(None).search(&query).await);

    assert!(err.is_timeout(), "expected timeout, got {err}");
    assert!(start.elapsed() < delay);
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let urls = ProvidersSettings {
        duckduckgo_url: "http://127.0.0.1:1/html/".to_string(),
        ..Default::default()
    };
    let registry = ProviderRegistry::new(Credentials::none(), &urls, HttpClient::new().unwrap());
    let query = search_bridge::SearchQuery::new("rust").unwrap();

    let err = assert_err!(registry.select(None).search(&query).await);
    assert!(matches!(err, SearchError::Network { status: None, .. }));
}

#[tokio::test]
async fn test_deadline_expiry_closes_connection() {
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;

    // accepts the request and never answers
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let n = socket.read(&mut buf).await.unwrap();
        assert!(n > 0);
        socket
    });

    let urls = ProvidersSettings {
        duckduckgo_url: format!("http://{}/html/", addr),
        ..Default::default()
    };
    let client = HttpClient::new()
        .unwrap()
        .with_deadline(Duration::from_millis(200));
    let registry = ProviderRegistry::new(Credentials::none(), &urls, client);
    let query = search_bridge::SearchQuery::new("rust").unwrap();

    let err = assert_err!(registry.select(None).search(&query).await);
    assert!(err.is_timeout());

    let mut socket = server.await.unwrap();
    let mut buf = [0u8; 64];
    let read = tokio::time::timeout(Duration::from_secs(5), socket.read(&mut buf))
        .await
        .expect("connection still open after the deadline");
    assert_eq!(read.unwrap(), 0);
}
