//! Error types for undita library.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for undita operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for undita library.
///
/// Every variant is fatal for a site build: conversion stops at the first
/// error and nothing is retried.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed markup in a topic or map.
    #[error("XML parsing error: {0}")]
    XmlParse(String),

    /// Well-formed XML that does not have the expected document shape.
    #[error("Invalid document: {0}")]
    InvalidData(String),

    /// A map reference points at a file that does not exist next to the map.
    #[error("Referenced topic not found: {}", .0.display())]
    MissingReference(PathBuf),

    /// More than one `.ditamap` in a single source folder.
    #[error("Multiple .ditamap files found in {}", .0.display())]
    MultipleMaps(PathBuf),

    /// A file in a map-less folder that is neither a topic nor Markdown.
    #[error("Unsupported file type: {}", .0.display())]
    UnsupportedFileType(PathBuf),

    /// Two files of one folder would be written to the same output path.
    #[error("{} would overwrite {}", origin.display(), output.display())]
    OutputCollision { output: PathBuf, origin: PathBuf },

    /// Source and output roots that cannot be used together.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// An error raised while processing a specific file.
    #[error("{}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Attaches the path of the file being processed to this error.
    ///
    /// Errors that already name their path are returned unchanged.
    pub fn in_file(self, path: impl AsRef<Path>) -> Self {
        match self {
            Error::MissingReference(_)
            | Error::MultipleMaps(_)
            | Error::UnsupportedFileType(_)
            | Error::OutputCollision { .. }
            | Error::File { .. } => self,
            other => Error::File {
                path: path.as_ref().to_path_buf(),
                source: Box::new(other),
            },
        }
    }

    /// Returns the innermost error, looking through [`Error::File`] wrappers.
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::File { source, .. } => source.root_cause(),
            other => other,
        }
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

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::Io(err.into())
    }
}
