//! Interactive flow: search form, live results document, follow-up actions.

use std::process::ExitCode;
use std::sync::mpsc;

use anyhow::Context;
use docsearch_core::{render_markdown, update, AppState, AppViewModel, Msg, ResultsView};
use docsearch_logging::search_debug;

use super::browser::open_url;
use super::clipboard::SystemClipboard;
use super::effects::EffectRunner;
use super::notify::{show_toast, Toast, ToastStyle};
use super::terminal::TerminalView;
use crate::preferences::Preferences;

pub fn run(prefs: &Preferences, initial_query: Option<String>) -> anyhow::Result<ExitCode> {
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(prefs.searcher(), prefs.clone(), msg_tx);
    let terminal = TerminalView::new();
    let mut app = App {
        state: AppState::new(),
        runner,
        terminal,
    };

    let mut pending_query = initial_query;
    loop {
        match app.state.view() {
            AppViewModel::Form => {
                let raw = match pending_query.take() {
                    Some(query) => query,
                    None => match app.terminal.prompt_query().context("reading query")? {
                        Some(line) => line,
                        None => break,
                    },
                };
                app.dispatch(Msg::QuerySubmitted(raw))?;
            }
            AppViewModel::Results(view) if view.loading => {
                let msg = msg_rx
                    .recv()
                    .context("search worker stopped unexpectedly")?;
                app.dispatch(msg)?;
            }
            AppViewModel::Results(view) => {
                let action = app
                    .terminal
                    .prompt_action(view.first_source().is_some())
                    .context("reading action")?;
                match action {
                    Some('c') => copy_answer(&view),
                    Some('o') => {
                        if let Some(url) = view.first_source() {
                            open_url(url);
                        }
                    }
                    Some('n') => app.dispatch(Msg::NewSearchRequested)?,
                    Some('q') | None => break,
                    Some(other) => search_debug!("ignoring unknown action {:?}", other),
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

struct App {
    state: AppState,
    runner: EffectRunner,
    terminal: TerminalView,
}

impl App {
    fn dispatch(&mut self, msg: Msg) -> anyhow::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        let view = state.view();
        self.state = state;

        if was_dirty {
            if let AppViewModel::Results(results) = &view {
                self.terminal
                    .show_document(&render_markdown(results))
                    .context("rendering results")?;
            }
        }
        self.runner.run(effects);
        Ok(())
    }
}

fn copy_answer(view: &ResultsView) {
    let answer = view.answer().unwrap_or_default();
    let copied = SystemClipboard::new().and_then(|mut clipboard| clipboard.write_text(answer));
    match copied {
        Ok(()) => show_toast(&Toast::new(ToastStyle::Success, "Answer copied to clipboard")),
        Err(err) => {
            let message = err.to_string();
            show_toast(&Toast::new(ToastStyle::Failure, "Could not copy answer").message(&message));
        }
    }
}
