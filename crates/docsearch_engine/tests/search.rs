use std::sync::Once;
use std::time::Duration;

use docsearch_engine::{
    FailureKind, RequestPayload, ReqwestSearcher, SearchSettings, Searcher, DEFAULT_VERSION,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(docsearch_logging::initialize_for_tests);
}

/// Matches a header value byte for byte, commas included.
struct ExactHeader(&'static str, &'static str);

impl Match for ExactHeader {
    fn matches(&self, request: &Request) -> bool {
        request
            .headers
            .get(self.0)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value == self.1)
    }
}

fn searcher_for(server: &MockServer) -> ReqwestSearcher {
    ReqwestSearcher::new(SearchSettings {
        endpoint: format!("{}/api/ai-search/v1", server.uri()),
        ..SearchSettings::default()
    })
}

fn ndjson(lines: &[serde_json::Value]) -> String {
    lines
        .iter()
        .map(|line| line.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[tokio::test]
async fn search_sends_browser_headers_and_json_body() {
    init_logging();
    let server = MockServer::start().await;
    let body = ndjson(&[
        json!({"chunkType": "MESSAGE_CHUNK", "text": "Copilot "}),
        json!({"chunkType": "MESSAGE_CHUNK", "text": "is great."}),
        json!({"chunkType": "SOURCES", "sources": [{"url": "https://docs.github.com/a"}]}),
    ]);
    Mock::given(method("POST"))
        .and(path("/api/ai-search/v1"))
        .and(ExactHeader("content-type", "application/json"))
        .and(ExactHeader("accept", "application/x-ndjson, */*"))
        .and(ExactHeader("accept-encoding", "gzip, deflate, br"))
        .and(ExactHeader("accept-language", "en-US,en;q=0.9"))
        .and(ExactHeader("origin", "https://docs.github.com"))
        .and(ExactHeader(
            "referer",
            "https://docs.github.com/?search-overlay-open=true",
        ))
        .and(ExactHeader(
            "user-agent",
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
(KHTML, like Gecko) Chrome/135.0.0.0 Safari/537.36",
        ))
        .and(body_json(json!({
            "query": "What is Copilot?",
            "version": DEFAULT_VERSION,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/x-ndjson"))
        .expect(1)
        .mount(&server)
        .await;

    let payload = RequestPayload::new("What is Copilot?", None, None);
    let outcome = searcher_for(&server)
        .search(&payload)
        .await
        .expect("search ok");

    assert_eq!(outcome.answer, "Copilot is great.");
    assert_eq!(outcome.sources, vec!["https://docs.github.com/a".to_string()]);
    assert_eq!(outcome.error, None);
}

#[tokio::test]
async fn search_includes_client_when_configured() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(json!({
            "query": "q",
            "version": "enterprise-server@3.14",
            "client": "docsearch",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            json!({"chunkType": "MESSAGE_CHUNK", "text": "ok"}).to_string(),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let payload = RequestPayload::new("q", Some("enterprise-server@3.14"), Some("docsearch"));
    let outcome = searcher_for(&server).search(&payload).await.unwrap();
    assert_eq!(outcome.answer, "ok");
}

#[tokio::test]
async fn service_unavailable_is_reported_as_temporary() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let payload = RequestPayload::new("q", None, None);
    let err = searcher_for(&server).search(&payload).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Unavailable);
    assert_eq!(
        err.message,
        "GitHub docs API is temporarily unavailable. Please try again later."
    );
}

#[tokio::test]
async fn other_http_failures_report_status_code() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let payload = RequestPayload::new("q", None, None);
    let err = searcher_for(&server).search(&payload).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert!(err.message.contains("500"), "message: {}", err.message);
}

#[tokio::test]
async fn embedded_error_object_becomes_api_failure() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"message":"Query too long"}"#),
        )
        .mount(&server)
        .await;

    let payload = RequestPayload::new("q", None, None);
    let err = searcher_for(&server).search(&payload).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Api);
    assert_eq!(err.message, "API returned an error: Query too long");
}

#[tokio::test]
async fn slow_response_hits_request_timeout() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("{}"),
        )
        .mount(&server)
        .await;

    let searcher = ReqwestSearcher::new(SearchSettings {
        endpoint: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..SearchSettings::default()
    });
    let payload = RequestPayload::new("q", None, None);
    let err = searcher.search(&payload).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn oversized_response_is_rejected() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("01234567890"))
        .mount(&server)
        .await;

    let searcher = ReqwestSearcher::new(SearchSettings {
        endpoint: server.uri(),
        max_bytes: 10,
        ..SearchSettings::default()
    });
    let payload = RequestPayload::new("q", None, None);
    let err = searcher.search(&payload).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(11)
        }
    );
}

#[tokio::test]
async fn malformed_endpoint_fails_before_sending() {
    init_logging();
    let searcher = ReqwestSearcher::new(SearchSettings {
        endpoint: "not a url".to_string(),
        ..SearchSettings::default()
    });
    let payload = RequestPayload::new("q", None, None);
    let err = searcher.search(&payload).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidEndpoint);
}
