//! Errors raised by the command-line front end.
//!
//! The engine itself never fails; these cover reading and watching input.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read standard input")]
    Stdin(#[source] std::io::Error),

    #[error("--watch needs a file path, not standard input")]
    WatchNeedsFile,

    #[error("Failed to watch for changes")]
    Watch(#[from] notify::Error),
}
