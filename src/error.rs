use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can end an invocation early.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("No arguments provided. Exiting...")]
    MissingArgument,
    #[error("{0:?} is not a plain file name inside the history directory")]
    InvalidFileName(String),
    #[error("error reading the file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("error parsing {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("error parsing {path}: entry {index}: {reason}")]
    InvalidEntry {
        path: PathBuf,
        index: usize,
        reason: String,
    },
    #[error("error writing the file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
