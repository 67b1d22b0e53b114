use std::sync::{mpsc, Arc};
use std::thread;

use docsearch_logging::{search_debug, search_error};

use crate::fetch::Searcher;
use crate::{EngineEvent, FailureKind, RequestPayload, SearchError, SearchId};

enum EngineCommand {
    Search {
        search_id: SearchId,
        payload: RequestPayload,
    },
}

/// Runs searches on a background thread that owns a Tokio runtime.
///
/// Completions are delivered on the sender passed to [`EngineHandle::new`].
/// Dropping the handle stops the worker; searches still running one second
/// later are cancelled without reporting.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(searcher: Arc<dyn Searcher>, event_tx: mpsc::Sender<EngineEvent>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    search_error!("failed to start search runtime: {}", err);
                    reject_all(cmd_rx, &event_tx, &err.to_string());
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let searcher = searcher.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(searcher.as_ref(), command, event_tx).await;
                });
            }
            // Let spawned searches report before the runtime goes away.
            runtime.shutdown_timeout(std::time::Duration::from_secs(1));
        });

        Self { cmd_tx }
    }

    pub fn submit(&self, search_id: SearchId, payload: RequestPayload) {
        let _ = self.cmd_tx.send(EngineCommand::Search { search_id, payload });
    }
}

async fn handle_command(
    searcher: &dyn Searcher,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Search { search_id, payload } => {
            search_debug!("search {} started", search_id);
            let result = searcher.search(&payload).await;
            let _ = event_tx.send(EngineEvent::SearchCompleted { search_id, result });
        }
    }
}

fn reject_all(
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: &mpsc::Sender<EngineEvent>,
    reason: &str,
) {
    while let Ok(EngineCommand::Search { search_id, .. }) = cmd_rx.recv() {
        let _ = event_tx.send(EngineEvent::SearchCompleted {
            search_id,
            result: Err(SearchError::new(FailureKind::Network, reason.to_string())),
        });
    }
}
