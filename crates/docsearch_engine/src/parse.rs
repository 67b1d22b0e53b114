use docsearch_logging::{search_debug, search_trace, search_warn};
use serde_json::Value;

use crate::{FailureKind, SearchError, SearchOutcome};

const UNRECOGNIZED_RESPONSE: &str = "No answer or sources found in the API response. \
The API might have returned an unexpected format or an error message.";
const EMPTY_RESPONSE: &str = "No results found. The API response was empty or unparsable.";

/// One classified NDJSON record.
#[derive(Debug, PartialEq, Eq)]
enum Chunk<'a> {
    Fragment(&'a str),
    Sources(Vec<String>),
    Ignored,
}

fn classify(record: &Value) -> Chunk<'_> {
    match record.get("chunkType").and_then(Value::as_str) {
        Some("MESSAGE_CHUNK") => {
            if let Some(text) = record.get("text").and_then(Value::as_str) {
                return Chunk::Fragment(text);
            }
        }
        Some("SOURCES") => {
            if let Some(sources) = record.get("sources").and_then(Value::as_array) {
                return Chunk::Sources(source_urls(sources));
            }
        }
        _ => {}
    }

    // Older responses used `type`/`value` instead of `chunkType`.
    match record.get("type").and_then(Value::as_str) {
        Some("answer") => match record.get("value").and_then(Value::as_str) {
            Some(value) => Chunk::Fragment(value),
            None => Chunk::Ignored,
        },
        Some("sources") => match record.get("value").and_then(Value::as_array) {
            Some(sources) => Chunk::Sources(source_urls(sources)),
            None => Chunk::Ignored,
        },
        _ => Chunk::Ignored,
    }
}

fn source_urls(entries: &[Value]) -> Vec<String> {
    entries
        .iter()
        .filter_map(|entry| entry.get("url").and_then(Value::as_str))
        .map(ToOwned::to_owned)
        .collect()
}

#[derive(Debug, Default)]
struct Accumulator {
    answer: String,
    sources: Vec<String>,
    last_fragment: Option<String>,
    found_answer: bool,
    found_sources: bool,
    parsed_records: usize,
}

impl Accumulator {
    fn push_fragment(&mut self, text: &str) {
        // The upstream stream occasionally repeats a chunk back to back.
        if self.last_fragment.as_deref() == Some(text) {
            search_debug!("skipping adjacent duplicate fragment {:?}", text);
            return;
        }
        self.answer.push_str(text);
        self.last_fragment = Some(text.to_string());
        self.found_answer = true;
    }

    fn replace_sources(&mut self, sources: Vec<String>) {
        search_debug!("received {} source(s)", sources.len());
        self.sources = sources;
        self.found_sources = true;
    }
}

/// Assembles an answer from an NDJSON response body.
///
/// Lines are parsed independently; malformed lines are skipped. Adjacent
/// identical fragments are appended once. Each sources record replaces the
/// previous list. A body that is a single JSON object with a non-empty `message`
/// value and no fragments is reported as [`FailureKind::Api`].
pub fn parse_ndjson(body: &str) -> Result<SearchOutcome, SearchError> {
    let trimmed = body.trim();
    let lines: Vec<&str> = if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('\n').collect()
    };
    search_debug!("response split into {} line(s)", lines.len());

    let mut acc = Accumulator::default();
    for line in &lines {
        let record: Value = match serde_json::from_str(line) {
            Ok(record) => record,
            Err(err) => {
                search_warn!("skipping unparsable response line {:?}: {}", line, err);
                continue;
            }
        };
        acc.parsed_records += 1;
        match classify(&record) {
            Chunk::Fragment(text) => acc.push_fragment(text),
            Chunk::Sources(sources) => acc.replace_sources(sources),
            Chunk::Ignored => search_trace!("ignoring record {}", record),
        }
    }

    if !acc.found_answer {
        if let Some(message) = lines.first().and_then(|first| embedded_error(first)) {
            return Err(SearchError::new(
                FailureKind::Api,
                format!("API returned an error: {message}"),
            ));
        }
    }

    if acc.answer.is_empty() && !acc.found_sources {
        return Ok(if acc.parsed_records > 0 {
            search_warn!("no answer or sources found in {} record(s)", acc.parsed_records);
            SearchOutcome::no_results(UNRECOGNIZED_RESPONSE)
        } else {
            search_warn!("response was empty or unparsable");
            SearchOutcome::no_results(EMPTY_RESPONSE)
        });
    }

    Ok(SearchOutcome {
        answer: acc.answer,
        sources: acc.sources,
        error: None,
    })
}

fn embedded_error(line: &str) -> Option<String> {
    if !line.starts_with('{') {
        return None;
    }
    let value: Value = serde_json::from_str(line).ok()?;
    match value.get("message")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(message) if message.is_empty() => None,
        Value::String(message) => Some(message.clone()),
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_chunk_requires_string_text() {
        assert_eq!(
            classify(&json!({"chunkType": "MESSAGE_CHUNK", "text": "hi"})),
            Chunk::Fragment("hi")
        );
        assert_eq!(
            classify(&json!({"chunkType": "MESSAGE_CHUNK", "text": 3})),
            Chunk::Ignored
        );
    }

    #[test]
    fn sources_entries_without_url_are_dropped() {
        let record = json!({"chunkType": "SOURCES", "sources": [{"url": "a"}, {"title": "b"}]});
        assert_eq!(classify(&record), Chunk::Sources(vec!["a".to_string()]));
    }

    #[test]
    fn legacy_shapes_are_recognized() {
        assert_eq!(
            classify(&json!({"type": "answer", "value": "old"})),
            Chunk::Fragment("old")
        );
        assert_eq!(
            classify(&json!({"type": "sources", "value": [{"url": "u"}]})),
            Chunk::Sources(vec!["u".to_string()])
        );
    }

    #[test]
    fn embedded_error_needs_object_with_message() {
        assert_eq!(embedded_error(r#"{"message":"bad"}"#), Some("bad".to_string()));
        assert_eq!(embedded_error(r#"{"message":""}"#), None);
        assert_eq!(embedded_error(r#"{"message":null}"#), None);
        assert_eq!(embedded_error(r#"{"message":0}"#), None);
        assert_eq!(embedded_error(r#"{"message":42}"#), Some("42".to_string()));
        assert_eq!(embedded_error(r#"{"status":1}"#), None);
        assert_eq!(embedded_error(r#"["message"]"#), None);
    }
}
