//! Error types for `BKDialog`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `BKDialog` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A dialog source file could not be opened or read.
    #[error("cannot open file {path}: {source}")]
    DialogFileUnreadable {
        /// The file that failed to open.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    // ==================== Authoring Format Errors ====================
    /// The file has no `type:` header, or its value is not `Dialog`.
    #[error("Expected Dialog type")]
    ExpectedDialogType,

    // ==================== Blob Format Errors ====================
    /// A compiled blob does not start with the `01 03 00` header.
    #[error("invalid dialog blob header: expected [01, 03, 00], found {0:02X?}")]
    InvalidBlobHeader([u8; 3]),

    /// A compiled blob string is not NUL-terminated where its length says.
    #[error("dialog blob string at offset {offset} is not NUL-terminated")]
    MissingTerminator {
        /// Byte offset of the expected terminator (after un-swapping).
        offset: usize,
    },

    /// A compiled blob entry declares a zero length.
    #[error("dialog blob entry at offset {offset} has zero length")]
    ZeroLengthEntry {
        /// Byte offset of the length byte (after un-swapping).
        offset: usize,
    },

    /// A compiled blob ends in the middle of a section.
    #[error("unexpected end of dialog blob")]
    UnexpectedEof,

    // ==================== Config Errors ====================
    /// The loader config file is not valid TOML or has wrong field types.
    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),

    // ==================== File System Errors ====================
    /// Directory traversal error.
    #[error("directory walk error: {0}")]
    WalkDirError(String),
}

// Add conversion from walkdir::Error
impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDirError(err.to_string())
    }
}

/// A specialized Result type for `BKDialog` operations.
pub type Result<T> = std::result::Result<T, Error>;
