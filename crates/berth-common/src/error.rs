//! Error types for workload composition
//!
//! Errors are structured with fields to aid debugging: validation failures
//! carry the offending field path, secret-resolution failures carry the key
//! that was being fetched.

use thiserror::Error;

/// Main error type for berth operations
#[derive(Debug, Error)]
pub enum Error {
    /// Validation error for a workload spec
    #[error("validation error: {message}")]
    Validation {
        /// Description of what's invalid
        message: String,
        /// The invalid field path (e.g., "pod.ports")
        field: Option<String>,
    },

    /// A secret value could not be fetched from the configured store
    #[error("secret resolution failed for '{key}': {message}")]
    SecretResolution {
        /// Store key that was being resolved
        key: String,
        /// Description of what failed
        message: String,
    },

    /// Serialization/deserialization error
    #[error("serialization error: {message}")]
    Serialization {
        /// Description of what failed
        message: String,
        /// The resource kind being serialized (if known)
        kind: Option<String>,
    },

    /// Composition error — a structural precondition was not met
    #[error("composition error: {message}")]
    Composition {
        /// Description of what failed
        message: String,
    },
}

impl Error {
    /// Create a validation error with the given message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a validation error with a field path
    pub fn validation_for_field(field: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Create a secret-resolution error
    pub fn secret_resolution(key: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::SecretResolution {
            key: key.into(),
            message: msg.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization {
            message: msg.into(),
            kind: None,
        }
    }

    /// Create a composition error
    pub fn composition(msg: impl Into<String>) -> Self {
        Self::Composition {
            message: msg.into(),
        }
    }

    /// The field path carried by a validation error, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => field.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_displays_message() {
        let err = Error::validation("port cannot be 0");
        assert_eq!(err.to_string(), "validation error: port cannot be 0");
        assert!(err.field().is_none());
    }

    #[test]
    fn validation_error_carries_field() {
        let err = Error::validation_for_field("pod.ports", "duplicate port");
        assert_eq!(err.field(), Some("pod.ports"));
    }

    #[test]
    fn secret_resolution_error_names_the_key() {
        let err = Error::secret_resolution("db/prod/password", "store unreachable");
        assert!(err.to_string().contains("db/prod/password"));
    }
}
