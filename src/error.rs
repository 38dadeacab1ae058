//! Error types for undocx library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for undocx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for undocx library.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input document could not be opened or parsed.
    #[error("Cannot read input document {}: {reason}", path.display())]
    InputAccess { path: PathBuf, reason: String },

    /// An output directory or file could not be created or written.
    #[error("Cannot write output {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file format is not recognized.
    #[error("Unknown file format")]
    UnknownFormat,

    /// The file format is recognized but not supported (e.g., legacy .doc).
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// ZIP archive parsing error.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// XML parsing error in a package part.
    #[error("XML parsing error: {0}")]
    XmlParse(String),

    /// Invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Required package part is missing.
    #[error("Missing required component: {0}")]
    MissingComponent(String),

    /// Text encoding error.
    #[error("Text encoding error: {0}")]
    Encoding(String),
}

impl Error {
    /// Wraps a reader error as an input access failure for `path`.
    pub fn input_access(path: impl Into<PathBuf>, err: Error) -> Self {
        match err {
            Error::InputAccess { .. } => err,
            other => Error::InputAccess {
                path: path.into(),
                reason: other.to_string(),
            },
        }
    }

    /// Builds an output write failure for `path`.
    pub fn output_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::OutputWrite {
            path: path.into(),
            source,
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::Encoding(err.to_string())
    }
}
