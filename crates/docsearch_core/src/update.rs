use crate::{AppState, Effect, Msg, Phase, Query, Screen, SLOW_WARNING_AFTER};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::QuerySubmitted(raw) => {
            if *state.screen() != Screen::Form {
                // One search at a time; the form is not visible.
                return (state, Vec::new());
            }
            match Query::new(&raw) {
                Some(query) => {
                    let search_id = state.begin_search(query.clone());
                    vec![
                        Effect::StartSearch { search_id, query },
                        Effect::ArmSlowWarning {
                            search_id,
                            after: SLOW_WARNING_AFTER,
                        },
                    ]
                }
                None => vec![Effect::ShowFailure {
                    title: "Please enter a search query".to_string(),
                }],
            }
        }
        Msg::SlowWarningElapsed { search_id } => {
            if let Some(phase) = state.current_phase_mut(search_id) {
                if matches!(phase, Phase::Loading { slow: false }) {
                    *phase = Phase::Loading { slow: true };
                    state.mark_dirty();
                }
            }
            Vec::new()
        }
        Msg::SearchSettled { search_id, reply } => {
            if let Some(phase) = state.current_phase_mut(search_id) {
                if matches!(phase, Phase::Loading { .. }) {
                    *phase = Phase::Settled(reply);
                    state.mark_dirty();
                }
            }
            Vec::new()
        }
        Msg::NewSearchRequested => {
            state.back_to_form();
            Vec::new()
        }
    };

    (state, effects)
}
