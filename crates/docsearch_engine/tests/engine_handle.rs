use std::sync::{mpsc, Arc};
use std::time::Duration;

use docsearch_engine::{
    EngineEvent, EngineHandle, FailureKind, RequestPayload, SearchError, SearchOutcome, Searcher,
};

struct CannedSearcher;

#[async_trait::async_trait]
impl Searcher for CannedSearcher {
    async fn search(&self, payload: &RequestPayload) -> Result<SearchOutcome, SearchError> {
        if payload.query == "fail" {
            let outcome = docsearch_engine::parse_ndjson(r#"{"message":"nope"}"#);
            return outcome;
        }
        Ok(SearchOutcome {
            answer: format!("answer for {}", payload.query),
            sources: vec!["https://docs.github.com/x".to_string()],
            error: None,
        })
    }
}

#[test]
fn engine_reports_each_search_with_its_id() {
    let (tx, rx) = mpsc::channel();
    let engine = EngineHandle::new(Arc::new(CannedSearcher), tx);

    engine.submit(7, RequestPayload::new("pages", None, None));
    let EngineEvent::SearchCompleted { search_id, result } =
        rx.recv_timeout(Duration::from_secs(5)).expect("completion");
    assert_eq!(search_id, 7);
    assert_eq!(result.unwrap().answer, "answer for pages");

    engine.submit(8, RequestPayload::new("fail", None, None));
    let EngineEvent::SearchCompleted { search_id, result } =
        rx.recv_timeout(Duration::from_secs(5)).expect("completion");
    assert_eq!(search_id, 8);
    assert_eq!(result.unwrap_err().kind, FailureKind::Api);
}
