//! User preferences, read fresh on every invocation.
//!
//! Stored as RON in `<config_dir>/docsearch/preferences.ron`, e.g.
//!
//! ```ron
//! (
//!     default_version: Some("enterprise-cloud@latest"),
//!     request_timeout_secs: 30,
//! )
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use docsearch_engine::{
    RequestPayload, ReqwestSearcher, SearchSettings, Searcher, DEFAULT_ENDPOINT,
};
use docsearch_logging::{search_debug, search_warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_DIR: &str = "docsearch";
const PREFERENCES_FILENAME: &str = "preferences.ron";

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("could not determine the user config directory")]
    NoConfigDir,
    #[error("failed to read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Docs version sent with every query; blank or missing means the default.
    pub default_version: Option<String>,
    /// Optional `client` field of the request body.
    pub client: Option<String>,
    pub endpoint: String,
    pub request_timeout_secs: u64,
}

impl Default for Preferences {
    fn default() -> Self {
        let settings = SearchSettings::default();
        Self {
            default_version: None,
            client: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: settings.request_timeout.as_secs(),
        }
    }
}

impl Preferences {
    /// Reads preferences from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, PreferencesError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                search_debug!("no preferences at {:?}, using defaults", path);
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(PreferencesError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        ron::from_str(&content).map_err(|source| PreferencesError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Like [`Preferences::load`], but logs problems and falls back to defaults.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|err| {
            search_warn!("{}; using default preferences", err);
            Self::default()
        })
    }

    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            endpoint: self.endpoint.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs.max(1)),
            ..SearchSettings::default()
        }
    }

    pub fn searcher(&self) -> Arc<dyn Searcher> {
        Arc::new(ReqwestSearcher::new(self.search_settings()))
    }

    pub fn payload(&self, query: &str) -> RequestPayload {
        RequestPayload::new(
            query,
            self.default_version.as_deref(),
            self.client.as_deref(),
        )
    }
}

pub fn default_path() -> Result<PathBuf, PreferencesError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(PREFERENCES_FILENAME))
        .ok_or(PreferencesError::NoConfigDir)
}
