//! Error types shared by the diff, patch and sort operations.

use thiserror::Error;

/// Error represents a failure of a single diff, patch or sort call.
///
/// Incomparable values are not an error: they surface as a `Replaced` change.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed path {path:?}: {reason}")]
    MalformedPath { path: String, reason: String },

    #[error("{path:?}: cannot sort array of mixed types {types:?}")]
    MixedArrayTypes { path: String, types: Vec<String> },

    #[error("invalid change: {0}")]
    InvalidChange(String),

    #[error("map key must be a string, got {0}")]
    NonStringKey(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Creates a malformed path error.
    pub fn malformed_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a mixed array types error.
    pub fn mixed_array_types(path: impl Into<String>, types: Vec<String>) -> Self {
        Error::MixedArrayTypes {
            path: path.into(),
            types,
        }
    }
}

/// Convenience alias for results of this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_path_display() {
        let err = Error::malformed_path("a[x]", "non-numeric index");
        let msg = format!("{}", err);
        assert!(msg.contains("a[x]"));
        assert!(msg.contains("non-numeric index"));
    }

    #[test]
    fn test_mixed_array_types_display() {
        let err = Error::mixed_array_types("c", vec!["int".into(), "string".into()]);
        assert!(format!("{}", err).contains("mixed types"));
    }
}
