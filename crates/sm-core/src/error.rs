use thiserror::Error;

/// Errors surfaced to the user while loading or searching
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewerError {
    #[error("Failed to fetch {source_name}: {reason}")]
    FetchFailed { source_name: String, reason: String },

    #[error("Failed to parse {source_name}: {reason}")]
    ParseFailed { source_name: String, reason: String },

    #[error("Search query is empty")]
    EmptyQuery,

    #[error("Feature data has not been loaded")]
    DataNotLoaded,

    #[error("No feature matches '{query}'")]
    NotFound { query: String },
}

impl ViewerError {
    pub fn fetch(source_name: impl Into<String>, reason: impl ToString) -> Self {
        ViewerError::FetchFailed {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    pub fn parse(source_name: impl Into<String>, reason: impl ToString) -> Self {
        ViewerError::ParseFailed {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    /// Load failures end the load attempt; the rest are shown inline
    pub fn is_load_failure(&self) -> bool {
        matches!(self, ViewerError::FetchFailed { .. } | ViewerError::ParseFailed { .. })
    }

    /// Short message for the sidebar or alert
    pub fn user_message(&self) -> &'static str {
        match self {
            ViewerError::FetchFailed { .. } | ViewerError::ParseFailed { .. } => {
                "Failed to load map data. Please check the log for details."
            }
            ViewerError::EmptyQuery => "Please enter a state name",
            ViewerError::DataNotLoaded => "Data not loaded yet. Please try again.",
            ViewerError::NotFound { .. } => "State not found. Try another name.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_failures_share_alert_message() {
        let fetch = ViewerError::fetch("india-states.geojson", "connection refused");
        let parse = ViewerError::parse("india-states.geojson", "expected value at line 1");

        assert!(fetch.is_load_failure());
        assert!(parse.is_load_failure());
        assert_eq!(fetch.user_message(), parse.user_message());
        assert!(fetch.to_string().contains("connection refused"));
    }

    #[test]
    fn test_search_errors_are_recoverable() {
        for error in [
            ViewerError::EmptyQuery,
            ViewerError::DataNotLoaded,
            ViewerError::NotFound { query: "atlantis".to_string() },
        ] {
            assert!(!error.is_load_failure());
        }
        assert_eq!(ViewerError::EmptyQuery.user_message(), "Please enter a state name");
    }
}
