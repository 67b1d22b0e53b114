use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use docsearch_core::{Effect, Msg, SearchId, SearchReply};
use docsearch_engine::{EngineEvent, EngineHandle, SearchError, SearchOutcome, Searcher};
use docsearch_logging::{search_debug, search_info, search_warn};

use super::notify::{show_toast, Toast, ToastStyle};
use crate::preferences::Preferences;

/// Executes the effects emitted by the results state machine.
pub struct EffectRunner {
    engine: EngineHandle,
    prefs: Preferences,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(searcher: Arc<dyn Searcher>, prefs: Preferences, msg_tx: mpsc::Sender<Msg>) -> Self {
        let (event_tx, event_rx) = mpsc::channel();
        let engine = EngineHandle::new(searcher, event_tx);
        spawn_event_forwarder(event_rx, msg_tx.clone());
        Self {
            engine,
            prefs,
            msg_tx,
        }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartSearch { search_id, query } => {
                    search_info!("StartSearch search_id={} query={:?}", search_id, query.as_str());
                    self.engine
                        .submit(search_id, self.prefs.payload(query.as_str()));
                }
                Effect::ArmSlowWarning { search_id, after } => {
                    self.arm_slow_warning(search_id, after);
                }
                Effect::ShowFailure { title } => {
                    show_toast(&Toast::new(ToastStyle::Failure, &title));
                }
            }
        }
    }

    fn arm_slow_warning(&self, search_id: SearchId, after: Duration) {
        let msg_tx = self.msg_tx.clone();
        // The state machine drops the message if the search settled meanwhile.
        thread::spawn(move || {
            thread::sleep(after);
            search_debug!("slow warning elapsed for search {}", search_id);
            let _ = msg_tx.send(Msg::SlowWarningElapsed { search_id });
        });
    }
}

fn spawn_event_forwarder(event_rx: mpsc::Receiver<EngineEvent>, msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        while let Ok(event) = event_rx.recv() {
            match event {
                EngineEvent::SearchCompleted { search_id, result } => {
                    let reply = reply_from(result);
                    if msg_tx.send(Msg::SearchSettled { search_id, reply }).is_err() {
                        break;
                    }
                }
            }
        }
    });
}

pub fn reply_from(result: Result<SearchOutcome, SearchError>) -> SearchReply {
    match result {
        Ok(SearchOutcome {
            error: Some(message),
            ..
        }) => {
            search_warn!("search returned no results: {}", message);
            SearchReply::NoResults { message }
        }
        Ok(SearchOutcome {
            answer, sources, ..
        }) => SearchReply::Answer { answer, sources },
        Err(err) => {
            search_warn!("search failed ({}): {}", err.kind, err.message);
            SearchReply::Failed {
                message: err.message,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsearch_engine::parse_ndjson;

    #[test]
    fn outcomes_map_onto_replies() {
        let ok = parse_ndjson(r#"{"chunkType":"MESSAGE_CHUNK","text":"hi"}"#);
        assert_eq!(
            reply_from(ok),
            SearchReply::Answer {
                answer: "hi".to_string(),
                sources: Vec::new(),
            }
        );

        let empty = parse_ndjson("");
        assert!(matches!(reply_from(empty), SearchReply::NoResults { .. }));

        let failed = parse_ndjson(r#"{"message":"X"}"#);
        assert_eq!(
            reply_from(failed),
            SearchReply::Failed {
                message: "API returned an error: X".to_string(),
            }
        );
    }
}
