//! Error types for chat-session-lib

/// Errors raised by a key/value store backing the transcript and preferences
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage write failed: {0}")]
    WriteFailed(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StorageError::Unavailable("no localStorage".to_string());
        assert_eq!(format!("{}", err), "Storage unavailable: no localStorage");

        let err = StorageError::WriteFailed("QuotaExceededError".to_string());
        assert_eq!(
            format!("{}", err),
            "Storage write failed: QuotaExceededError"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: StorageError = io.into();
        assert!(matches!(err, StorageError::Io(_)));
        assert!(format!("{:?}", err).contains("Io"));
    }
}
