//! No-UI flow: search the selection (or clipboard) and copy the answer.

use std::process::ExitCode;
use std::sync::mpsc;

use anyhow::Context;
use docsearch_core::{format_clipboard_answer, resolve_query, AcquireError, QueryOrigin};
use docsearch_engine::{EngineEvent, EngineHandle, SearchError, SearchOutcome};
use docsearch_logging::{search_debug, search_info, search_warn};

use super::browser::open_url;
use super::clipboard::SystemClipboard;
use super::notify::{show_toast, show_toast_with_action, Toast, ToastStyle};
use crate::preferences::Preferences;

const SEARCH_ID: u64 = 1;

pub fn run(prefs: &Preferences, open_first_source: bool) -> anyhow::Result<ExitCode> {
    let mut clipboard = match SystemClipboard::new() {
        Ok(clipboard) => clipboard,
        Err(err) => {
            return Ok(fail_acquire(&AcquireError::ClipboardUnavailable(
                err.to_string(),
            )))
        }
    };

    let selection = clipboard.read_selection();
    if let Err(err) = &selection {
        search_debug!("no selection available: {}", err);
    }
    let acquired = match resolve_query(selection, || clipboard.read_text()) {
        Ok(acquired) => acquired,
        Err(err) => return Ok(fail_acquire(&err)),
    };
    if acquired.origin == QueryOrigin::Clipboard {
        show_toast(&Toast::new(
            ToastStyle::Success,
            "Using clipboard content as query",
        ));
    }

    let query = acquired.query.as_str();
    let searching = format!("Query: {query}");
    show_toast(&Toast::new(ToastStyle::Animated, "Searching GitHub docs").message(&searching));

    let (event_tx, event_rx) = mpsc::channel();
    let engine = EngineHandle::new(prefs.searcher(), event_tx);
    engine.submit(SEARCH_ID, prefs.payload(query));
    let EngineEvent::SearchCompleted { result, .. } = event_rx
        .recv()
        .context("search worker stopped unexpectedly")?;

    let (outcome, text) = match clipboard_payload(result) {
        Ok(ready) => ready,
        Err(message) => return Ok(fail_search(&message)),
    };

    if let Err(err) = clipboard.write_text(&text) {
        return Ok(fail_search(&format!("Could not write to clipboard: {err}")));
    }
    println!("{text}");
    search_info!(
        "copied answer ({} chars, {} sources)",
        outcome.answer.len(),
        outcome.sources.len()
    );

    let first_source = outcome.sources.first();
    let toast = Toast::new(ToastStyle::Success, "Answer copied to clipboard")
        .message("Paste it anywhere");
    let clicked = match first_source {
        Some(_) if !open_first_source => show_toast_with_action(&toast, "View Sources"),
        _ => {
            show_toast(&toast);
            false
        }
    };
    if let Some(url) = first_source.filter(|_| clicked || open_first_source) {
        open_url(url);
    }

    Ok(ExitCode::SUCCESS)
}

/// Decides what a finished search puts on the clipboard.
///
/// Hard failures and "no results" outcomes yield the message to report, and
/// the clipboard is left alone.
fn clipboard_payload(
    result: Result<SearchOutcome, SearchError>,
) -> Result<(SearchOutcome, String), String> {
    match result {
        Ok(outcome) if outcome.is_success() => {
            let text = format_clipboard_answer(&outcome.answer, &outcome.sources);
            Ok((outcome, text))
        }
        Ok(outcome) => Err(outcome.error.unwrap_or_default()),
        Err(err) => Err(err.message),
    }
}

fn fail_acquire(err: &AcquireError) -> ExitCode {
    search_warn!("query acquisition failed: {}", err);
    show_toast(&Toast::new(ToastStyle::Failure, err.title()).message(err.hint()));
    ExitCode::FAILURE
}

fn fail_search(message: &str) -> ExitCode {
    search_warn!("search failed: {}", message);
    show_toast(&Toast::new(ToastStyle::Failure, "Search failed").message(message));
    ExitCode::FAILURE
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsearch_engine::parse_ndjson;
    use pretty_assertions::assert_eq;

    #[test]
    fn answer_with_sources_becomes_clipboard_text() {
        let body = concat!(
            r#"{"chunkType":"MESSAGE_CHUNK","text":"Use Pages."}"#,
            "\n",
            r#"{"chunkType":"SOURCES","sources":[{"url":"https://docs.github.com/pages"}]}"#,
        );
        let (outcome, text) = clipboard_payload(parse_ndjson(body)).unwrap();
        assert_eq!(outcome.sources, vec!["https://docs.github.com/pages".to_string()]);
        assert_eq!(text, "Use Pages.\n\nSources:\n- https://docs.github.com/pages");
    }

    #[test]
    fn no_results_outcome_skips_clipboard() {
        let message = clipboard_payload(parse_ndjson("not json")).unwrap_err();
        assert_eq!(
            message,
            "No results found. The API response was empty or unparsable."
        );
    }

    #[test]
    fn hard_failure_skips_clipboard() {
        let message = clipboard_payload(parse_ndjson(r#"{"message":"rate limited"}"#)).unwrap_err();
        assert_eq!(message, "API returned an error: rate limited");
    }
}
