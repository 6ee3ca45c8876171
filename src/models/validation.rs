//! Validation error types

use std::fmt;

/// Validation error for request payloads
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// Value doesn't match the required format (e.g., base64 payload)
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// Decoded value exceeds the maximum allowed size
    TooLarge {
        field: &'static str,
        max_bytes: usize,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
            Self::TooLarge { field, max_bytes } => {
                write!(
                    f,
                    "{} exceeds maximum decoded size of {} bytes",
                    field, max_bytes
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLarge {
            field: "avatar_url",
            max_bytes: 5 * 1024 * 1024,
        };
        assert_eq!(
            err.to_string(),
            "avatar_url exceeds maximum decoded size of 5242880 bytes"
        );
    }
}
