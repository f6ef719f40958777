//! Error types for the unslide library.

use std::io;
use thiserror::Error;

/// Result type alias for unslide operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reconstructing a presentation.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The container could not be opened or a part could not be decompressed.
    #[error("Archive read error: {0}")]
    ArchiveRead(String),

    /// A single XML part (slide, relationships) could not be parsed.
    #[error("Failed to parse part {part}: {reason}")]
    PartParse {
        /// Archive path of the offending part
        part: String,
        /// Underlying parser message
        reason: String,
    },

    /// A single media entry could not be materialized.
    #[error("Failed to extract media {name}: {reason}")]
    MediaExtract {
        /// Archive path of the media entry
        name: String,
        /// Underlying reader message
        reason: String,
    },

    /// A strategy finished but produced nothing worth showing.
    #[error("No extractable content: {0}")]
    NoExtractableContent(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// A required package component is missing.
    #[error("Missing component: {0}")]
    MissingComponent(String),

    /// The file format could not be determined.
    #[error("Unknown file format")]
    UnknownFormat,

    /// The file format is recognized but not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Error during rendering.
    #[error("Render error: {0}")]
    Render(String),
}

/// Coarse classification of an [`Error`] used for escalation decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Container-level failure, fatal to a pipeline stage
    ArchiveRead,
    /// One part failed; contained at slide or relationship level
    PartParse,
    /// One image failed; contained at media level
    MediaExtract,
    /// A strategy found nothing usable
    NoExtractableContent,
    /// Anything else (I/O, rendering, unsupported input)
    Other,
}

impl Error {
    /// Returns the escalation class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ArchiveRead(_) | Error::MissingComponent(_) => ErrorKind::ArchiveRead,
            Error::PartParse { .. } | Error::XmlParse(_) => ErrorKind::PartParse,
            Error::MediaExtract { .. } => ErrorKind::MediaExtract,
            Error::NoExtractableContent(_) => ErrorKind::NoExtractableContent,
            Error::Io(_) | Error::UnknownFormat | Error::UnsupportedFormat(_) | Error::Render(_) => {
                ErrorKind::Other
            }
        }
    }

    /// Wrap this error as a parse failure of `part`.
    pub fn in_part(self, part: impl Into<String>) -> Self {
        match self {
            Error::PartParse { .. } => self,
            other => Error::PartParse {
                part: part.into(),
                reason: other.to_string(),
            },
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ArchiveRead(err.to_string())
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
