//! Docsearch engine: request building, HTTP search and NDJSON answer assembly.
mod engine;
mod fetch;
mod parse;
mod request;
mod types;

pub use engine::EngineHandle;
pub use fetch::{ReqwestSearcher, SearchSettings, Searcher, DEFAULT_ENDPOINT};
pub use parse::parse_ndjson;
pub use request::{RequestPayload, DEFAULT_VERSION};
pub use types::{EngineEvent, FailureKind, SearchError, SearchId, SearchOutcome};
