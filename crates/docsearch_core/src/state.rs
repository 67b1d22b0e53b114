use crate::view_model::{AppViewModel, ResultsView};
use crate::{Query, SearchReply};

pub type SearchId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Loading { slow: bool },
    Settled(SearchReply),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Form,
    Results {
        search_id: SearchId,
        query: Query,
        phase: Phase,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    screen: Screen,
    last_search_id: SearchId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn view(&self) -> AppViewModel {
        match &self.screen {
            Screen::Form => AppViewModel::Form,
            Screen::Results { query, phase, .. } => AppViewModel::Results(ResultsView {
                query: query.as_str().to_string(),
                loading: matches!(phase, Phase::Loading { .. }),
                slow_warning: matches!(phase, Phase::Loading { slow: true }),
                reply: match phase {
                    Phase::Settled(reply) => Some(reply.clone()),
                    Phase::Loading { .. } => None,
                },
            }),
        }
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn begin_search(&mut self, query: Query) -> SearchId {
        self.last_search_id += 1;
        self.screen = Screen::Results {
            search_id: self.last_search_id,
            query,
            phase: Phase::Loading { slow: false },
        };
        self.dirty = true;
        self.last_search_id
    }

    /// Mutable phase of the current search if `search_id` is still current.
    pub(crate) fn current_phase_mut(&mut self, search_id: SearchId) -> Option<&mut Phase> {
        match &mut self.screen {
            Screen::Results {
                search_id: current,
                phase,
                ..
            } if *current == search_id => Some(phase),
            _ => None,
        }
    }

    pub(crate) fn back_to_form(&mut self) {
        if self.screen != Screen::Form {
            self.screen = Screen::Form;
            self.dirty = true;
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
