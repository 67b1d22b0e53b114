use crate::SearchId;

/// Final result of a search as the results view sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchReply {
    Answer { answer: String, sources: Vec<String> },
    /// The service answered but nothing usable came back.
    NoResults { message: String },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User submitted the search form.
    QuerySubmitted(String),
    /// The advisory timer armed for `search_id` fired.
    SlowWarningElapsed { search_id: SearchId },
    /// Engine completion for a search.
    SearchSettled {
        search_id: SearchId,
        reply: SearchReply,
    },
    /// User asked to go back to the form.
    NewSearchRequested,
}
