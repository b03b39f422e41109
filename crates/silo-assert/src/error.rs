//! Error types for assertion issuing and decoding.

use thiserror::Error;

/// Errors from assertion operations.
#[derive(Error, Debug)]
pub enum AssertError {
    /// The primary key has the wrong arity for the assertion kind, or a
    /// component fails to decode.
    #[error("invalid primary key: {0}")]
    PrimaryKey(String),

    /// A freshly issued assertion failed its own decode or signature
    /// check. Indicates a bug, never a bad request.
    #[error("assertion encoding error: {0}")]
    Encoding(String),

    /// Signature verification failed on a decoded assertion.
    #[error("signature verification failed: {0}")]
    Verification(String),

    /// Key file I/O error.
    #[error("key file error: {0}")]
    Io(#[from] std::io::Error),

    /// Key seed material is not a valid 32-byte hex string.
    #[error("invalid key seed: {0}")]
    Seed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_key_display() {
        let err = AssertError::PrimaryKey("expected 2 components, got 1".to_string());
        assert!(format!("{err}").contains("expected 2 components"));
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no key file");
        let err = AssertError::from(io_err);
        assert!(format!("{err}").contains("no key file"));
    }
}
