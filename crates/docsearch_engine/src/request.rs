use serde::Serialize;

/// Docs version used when no preference is configured.
pub const DEFAULT_VERSION: &str = "free-pro-team@latest";

/// JSON body of the search request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestPayload {
    pub query: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
}

impl RequestPayload {
    /// Builds a payload, falling back to [`DEFAULT_VERSION`] for a blank version
    /// and dropping a blank client.
    pub fn new(query: impl Into<String>, version: Option<&str>, client: Option<&str>) -> Self {
        let version = version
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_VERSION)
            .to_string();
        let client = client
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(ToOwned::to_owned);
        Self {
            query: query.into(),
            version,
            client,
        }
    }
}
