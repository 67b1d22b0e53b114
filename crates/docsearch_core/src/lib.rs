//! Docsearch core: pure query policy, results state machine and rendering.
mod acquire;
mod effect;
mod markdown;
mod msg;
mod query;
mod state;
mod update;
mod view_model;

pub use acquire::{resolve_query, AcquireError, AcquiredQuery, QueryOrigin};
pub use effect::{Effect, SLOW_WARNING_AFTER};
pub use markdown::{format_clipboard_answer, render_markdown, source_title, visible_sources};
pub use msg::{Msg, SearchReply};
pub use query::Query;
pub use state::{AppState, Phase, Screen, SearchId};
pub use update::update;
pub use view_model::{AppViewModel, ResultsView};
