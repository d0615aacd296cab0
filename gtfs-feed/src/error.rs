//! Error management for the tabular I/O boundary.
//!
//! The editing engine itself degrades silently (see the crate docs); only
//! reading and writing feed files can fail in ways the caller must handle.
use thiserror::Error;

/// An error that can occur while reading or writing feed tables.
#[derive(Error, Debug)]
pub enum Error {
    /// A mandatory file is not present in the feed directory
    #[error("could not find file {0}")]
    MissingFile(String),
    /// A row references an id that is not present in the loaded tables
    #[error("the id {0} is not known")]
    Reference(String),
    /// The given path is not a directory
    #[error("could not read feed: {0} is not a directory")]
    NotADirectory(String),
    /// Generic Input/Output error
    #[error("impossible to read or write file")]
    Io(#[from] std::io::Error),
    /// Impossible to open a specific file
    #[error("impossible to open '{file_name}'")]
    NamedFileIo {
        /// The file that could not be opened
        file_name: String,
        /// The underlying error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// A CSV file could not be parsed or written
    #[error("invalid csv in '{file_name}'")]
    Csv {
        /// The file that could not be processed
        file_name: String,
        /// The initial error from the csv library
        #[source]
        source: csv::Error,
    },
}
