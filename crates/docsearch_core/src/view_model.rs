use crate::SearchReply;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppViewModel {
    Form,
    Results(ResultsView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    pub query: String,
    pub loading: bool,
    pub slow_warning: bool,
    pub reply: Option<SearchReply>,
}

impl ResultsView {
    pub fn answer(&self) -> Option<&str> {
        match &self.reply {
            Some(SearchReply::Answer { answer, .. }) => Some(answer.as_str()),
            _ => None,
        }
    }

    pub fn first_source(&self) -> Option<&str> {
        match &self.reply {
            Some(SearchReply::Answer { sources, .. }) => sources.first().map(String::as_str),
            _ => None,
        }
    }
}
