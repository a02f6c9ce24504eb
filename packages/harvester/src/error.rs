//! Error types for the harvester.
//!
//! `HarvesterError` wraps the catalogue's own errors alongside the I/O,
//! network and serialization failures that only occur at this layer.

use std::path::PathBuf;

use thiserror::Error;
use villager_trades_catalogue::CatalogueError;

/// Main error type for the harvester library.
#[derive(Debug, Error)]
pub enum HarvesterError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// All retry attempts failed.
    #[error("Request failed after {attempts} attempts: {message}")]
    RetriesExhausted { attempts: u32, message: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Cache file could not be (de)serialized.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Settings file could not be (de)serialized.
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Trade tables could not be turned into a catalogue.
    #[error(transparent)]
    Catalogue(#[from] CatalogueError),

    /// No cached catalogue to compare against.
    #[error("No cached trade data at {}. Run 'list' or 'refresh' first", .0.display())]
    MissingCache(PathBuf),

    /// A settings value was rejected.
    #[error("Invalid setting '{key}': {message}")]
    InvalidSetting { key: String, message: String },

    /// The trading page does not have the expected shape.
    #[error("Unexpected page structure: {0}")]
    PageStructure(String),
}

/// Result type alias for harvester operations.
pub type Result<T> = std::result::Result<T, HarvesterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_error_is_transparent() {
        let inner = CatalogueError::IndexMismatch {
            job_sites: 12,
            tables: 13,
        };
        let expected = inner.to_string();
        let err = HarvesterError::from(inner);
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn test_missing_cache_mentions_path() {
        let err = HarvesterError::MissingCache(PathBuf::from("data/villager-data.json"));
        assert!(err.to_string().contains("data/villager-data.json"));
    }

    #[test]
    fn test_invalid_setting_display() {
        let err = HarvesterError::InvalidSetting {
            key: "display-mode".to_string(),
            message: "expected simple, complex or full".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid setting 'display-mode': expected simple, complex or full"
        );
    }
}
