//! # CLI Error Type
//!
//! Everything that can stop the front-end: bad configuration, terminal I/O,
//! and domain errors surfaced while building the catalog.
//!
//! Domain errors raised *during* an order are not fatal; the menu prints
//! them and keeps running.

use shelf_core::{CoreError, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration is structurally fine but semantically wrong.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Config file could not be parsed.
    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config could not be written.
    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Failed to render receipt: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog entry rejected by the domain rules.
    #[error("{0}")]
    Core(#[from] CoreError),
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::Core(err.into())
    }
}

pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_becomes_core_error() {
        let err: CliError = ValidationError::Required {
            field: "name".to_string(),
        }
        .into();
        assert!(matches!(err, CliError::Core(CoreError::Validation(_))));
        assert_eq!(err.to_string(), "Validation error: name is required");
    }

    #[test]
    fn test_invalid_config_message() {
        let err = CliError::InvalidConfig("store name is empty".to_string());
        assert_eq!(err.to_string(), "Invalid configuration: store name is empty");
    }
}
