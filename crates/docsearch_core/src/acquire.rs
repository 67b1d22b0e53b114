use thiserror::Error;

use crate::Query;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOrigin {
    Selection,
    Clipboard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquiredQuery {
    pub query: Query,
    pub origin: QueryOrigin,
}

/// Why the headless flow could not find anything to search for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcquireError {
    #[error("No text available")]
    NothingAvailable,
    #[error("Could not access clipboard: {0}")]
    ClipboardUnavailable(String),
}

impl AcquireError {
    pub fn title(&self) -> &'static str {
        match self {
            AcquireError::NothingAvailable => "No text available",
            AcquireError::ClipboardUnavailable(_) => "Could not access clipboard",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            AcquireError::NothingAvailable => {
                "Please select or copy text to search in GitHub docs"
            }
            AcquireError::ClipboardUnavailable(_) => {
                "Please try using `docsearch ask` instead"
            }
        }
    }
}

/// Picks the query for the headless flow.
///
/// Selection wins when it holds non-blank text; any selection failure is
/// treated as "no selection". The clipboard is only consulted after that, so
/// `clipboard` is a closure that performs the read lazily.
pub fn resolve_query<E, F>(
    selection: Result<Option<String>, E>,
    clipboard: F,
) -> Result<AcquiredQuery, AcquireError>
where
    E: std::fmt::Display,
    F: FnOnce() -> Result<Option<String>, E>,
{
    if let Ok(Some(text)) = &selection {
        if let Some(query) = Query::new(text) {
            return Ok(AcquiredQuery {
                query,
                origin: QueryOrigin::Selection,
            });
        }
    }

    match clipboard() {
        Ok(text) => text
            .as_deref()
            .and_then(Query::new)
            .map(|query| AcquiredQuery {
                query,
                origin: QueryOrigin::Clipboard,
            })
            .ok_or(AcquireError::NothingAvailable),
        Err(err) => Err(AcquireError::ClipboardUnavailable(err.to_string())),
    }
}
