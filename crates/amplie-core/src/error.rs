//! Error types for the Amplie attendance core

use std::{error::Error as StdError, fmt};

/// Main error type for the Amplie attendance core
///
/// The derivations in [`crate::tickets`] and [`crate::contacts`] are total and
/// never produce one of these; errors come from loading configuration,
/// parsing snapshots and mutating a [`crate::book::ContactBook`].
#[derive(Debug)]
pub enum Error {
    /// Reading a snapshot or configuration file failed
    Io(std::io::Error),

    /// Configuration could not be loaded or is invalid
    Configuration {
        /// Details from the configuration layer
        message: String,
    },

    /// A record was rejected before entering the contact book
    Validation {
        /// Offending field name
        field: String,
        /// Human readable reason
        message: String,
    },

    /// Edit or delete targeted a missing record
    NotFound {
        /// Description such as `contact 42`
        resource: String,
    },

    /// Snapshot JSON could not be read or written
    Serialization(serde_json::Error),

    /// Anything else
    Other(String),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build a validation error for a single field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Build a not-found error for a contact id
    #[must_use]
    pub fn contact_not_found(id: crate::types::ContactId) -> Self {
        Self::NotFound {
            resource: format!("contact {id}"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Configuration { message } => write!(f, "Configuration error: {message}"),
            Self::Validation { field, message } => {
                write!(f, "Validation error: {field} - {message}")
            }
            Self::NotFound { resource } => write!(f, "Resource not found: {resource}"),
            Self::Serialization(err) => write!(f, "Serialization error: {err}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err)
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration {
            message: err.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        // Report the first failing field; field_errors is keyed by name so the
        // pick is made deterministic by sorting.
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        match fields.first() {
            Some((field, errs)) => {
                let message = errs
                    .first()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map_or_else(|| e.code.to_string(), ToString::to_string)
                    })
                    .unwrap_or_default();
                Self::Validation {
                    field: field.to_string(),
                    message,
                }
            }
            None => Self::Validation {
                field: String::new(),
                message: errors.to_string(),
            },
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::panic,
    clippy::uninlined_format_args,
    clippy::match_same_arms
)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io;

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "snapshot missing");
        let app_error = Error::from(io_error);

        match app_error {
            Error::Io(_) => {}
            _ => panic!("Expected Io error variant"),
        }

        assert!(format!("{}", app_error).contains("I/O error"));
        assert!(app_error.source().is_some());
    }

    #[test]
    fn test_configuration_error() {
        let error = Error::Configuration {
            message: "missing agent section".to_string(),
        };

        assert_eq!(
            format!("{}", error),
            "Configuration error: missing agent section"
        );
    }

    #[test]
    fn test_validation_error() {
        let error = Error::validation("phone", "must not be empty");

        assert_eq!(
            format!("{}", error),
            "Validation error: phone - must not be empty"
        );
        assert!(error.source().is_none());
    }

    #[test]
    fn test_contact_not_found() {
        let error = Error::contact_not_found(42);
        assert_eq!(format!("{}", error), "Resource not found: contact 42");
    }

    #[test]
    fn test_serialization_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{\"id\": }").unwrap_err();
        let app_error = Error::from(json_error);

        assert!(matches!(app_error, Error::Serialization(_)));
        assert!(format!("{}", app_error).contains("Serialization error"));
        assert!(app_error.source().is_some());
    }

    #[test]
    fn test_validation_errors_conversion_picks_first_field() {
        let mut errors = validator::ValidationErrors::new();
        errors.add("phone", validator::ValidationError::new("length"));
        errors.add("name", validator::ValidationError::new("length"));

        match Error::from(errors) {
            Error::Validation { field, message } => {
                assert_eq!(field, "name");
                assert_eq!(message, "length");
            }
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_other_error() {
        let error = Error::Other("unexpected".to_string());
        assert_eq!(format!("{}", error), "unexpected");
    }
}
