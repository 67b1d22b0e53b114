/// A search query that is guaranteed to contain non-whitespace text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// Trims `raw`; `None` if nothing is left.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Query;

    #[test]
    fn blank_input_is_rejected() {
        assert_eq!(Query::new(""), None);
        assert_eq!(Query::new(" \n\t "), None);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let query = Query::new("  What is Copilot?\n").unwrap();
        assert_eq!(query.as_str(), "What is Copilot?");
    }
}
