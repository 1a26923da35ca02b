//! Errors raised while building or decoding POM module descriptors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PomError {
    #[error("dependency management extra info '{key}' has {parts} parts, expected {expected}")]
    MalformedManagementKey {
        key: String,
        parts: usize,
        expected: usize,
    },

    #[error("unknown dependency management field '{field}' in '{key}'")]
    UnknownManagementField { key: String, field: String },

    #[error("dependency management exclusion '{content}' has {parts} parts, expected 2")]
    MalformedExclusion { content: String, parts: usize },

    #[error("plugin entry '{entry}' has {parts} parts, expected 3")]
    MalformedPlugin { entry: String, parts: usize },

    #[error("Failed to locate artifact '{artifact}': {source}")]
    ArtifactLookup {
        artifact: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to parse builder settings: {0}")]
    Settings(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PomError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PomError::MalformedManagementKey {
            key: "m:dependency.management__a__b".into(),
            parts: 3,
            expected: 5,
        };
        assert_eq!(
            err.to_string(),
            "dependency management extra info 'm:dependency.management__a__b' has 3 parts, expected 5"
        );
    }

    #[test]
    fn test_exclusion_error_display() {
        let err = PomError::MalformedExclusion {
            content: "only-one".into(),
            parts: 1,
        };
        assert!(err.to_string().contains("only-one"));
        assert!(err.to_string().contains("expected 2"));
    }

    #[test]
    fn test_lookup_error_keeps_source() {
        use std::error::Error as _;

        let err = PomError::ArtifactLookup {
            artifact: "org.example#lib;1.0!lib.jar".into(),
            source: Box::new(std::io::Error::other("connection refused")),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_settings_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let err: PomError = json_err.into();
        assert!(matches!(err, PomError::Settings(_)));
    }
}
