//! Error types for lrucache

use std::fmt;

/// Result type alias for cache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Cache could not be constructed (e.g. zero capacity)
    InvalidConfiguration(String),

    /// Key is not resident; carries the key's `Debug` rendering
    KeyNotFound(String),

    /// Index and recency list disagree. Only reported by `check_invariants`.
    InvariantViolation(String),
}

impl Error {
    /// True for a cache miss
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::KeyNotFound(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::KeyNotFound(key) => write!(f, "Key {} not found in cache", key),
            Error::InvariantViolation(msg) => write!(f, "Invariant violated: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::KeyNotFound("1".to_string());
        assert_eq!(err.to_string(), "Key 1 not found in cache");

        let err = Error::InvalidConfiguration("capacity must be greater than 0".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: capacity must be greater than 0"
        );
    }

    #[test]
    fn test_is_not_found() {
        assert!(Error::KeyNotFound("k".into()).is_not_found());
        assert!(!Error::InvalidConfiguration("bad".into()).is_not_found());
    }
}
