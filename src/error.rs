//! Error types for beeline library.

use std::io;
use thiserror::Error;

/// Result type alias for beeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur at the fallible edges of the library.
///
/// The reformatting stages themselves never fail; these cover reading
/// snapshots, decoding commands and writing output.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The XHTML snapshot is not well-formed.
    #[error("XHTML parsing error at byte {position}: {message}")]
    Parse {
        /// Byte offset reported by the reader
        position: u64,
        /// Description of the problem
        message: String,
    },

    /// The snapshot has no root element.
    #[error("Document has no root element")]
    EmptyDocument,

    /// JSON decoding or encoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A command message was recognised as JSON but is not a valid command.
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// Error during serialization of the document.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Build a parse error from a position and message.
    pub fn parse(position: u64, message: impl Into<String>) -> Self {
        Error::Parse {
            position,
            message: message.into(),
        }
    }
}
