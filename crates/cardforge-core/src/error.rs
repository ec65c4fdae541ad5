//! Error types for cardforge

use thiserror::Error;

/// Main error type for cardforge operations
#[derive(Error, Debug)]
pub enum ForgeError {
    /// Card was not found in storage
    #[error("Card not found: {0}")]
    CardNotFound(String),

    /// Unknown content profile key
    #[error("Unknown profile: {0}")]
    UnknownProfile(String),

    /// Database creation/opening error
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    /// Transaction error
    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    /// Table error
    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    /// Storage operation error
    #[error("Storage operation error: {0}")]
    StorageOp(#[from] redb::StorageError),

    /// Commit error
    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    /// Error during serialization/deserialization
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Stored record matches neither the current nor the legacy shape
    #[error("Unrecognized record shape: {0}")]
    RecordShape(String),

    /// Imported card document was corrupt or had the wrong shape
    #[error("Malformed import: {0}")]
    MalformedImport(String),

    /// Image decoding/encoding failed
    #[error("Image error: {0}")]
    Image(String),

    /// Composition could not be rasterized
    #[error("Render error: {0}")]
    Render(String),

    /// Archive could not be written
    #[error("Archive error: {0}")]
    Archive(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ForgeError {
    fn from(err: serde_json::Error) -> Self {
        ForgeError::Serialization(err.to_string())
    }
}

impl From<image::ImageError> for ForgeError {
    fn from(err: image::ImageError) -> Self {
        ForgeError::Image(err.to_string())
    }
}

impl From<zip::result::ZipError> for ForgeError {
    fn from(err: zip::result::ZipError) -> Self {
        ForgeError::Archive(err.to_string())
    }
}

/// Result type alias using ForgeError
pub type ForgeResult<T> = Result<T, ForgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ForgeError::CardNotFound("01HZX".to_string());
        assert_eq!(format!("{}", err), "Card not found: 01HZX");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let forge_err: ForgeError = io_err.into();
        assert!(matches!(forge_err, ForgeError::Io(_)));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let forge_err: ForgeError = json_err.into();
        assert!(matches!(forge_err, ForgeError::Serialization(_)));
    }
}
