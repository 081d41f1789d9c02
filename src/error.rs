//! Error types for the scaling harness.
//!
//! Workload failures are never wrapped here: [`crate::recorder::Timed::try_call`]
//! hands the workload's own error back to the caller untouched. This enum only
//! covers what the harness itself can get wrong.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A workload was wrapped with an empty display name.
    ///
    /// Samples are pivoted by function name, so an empty name would produce an
    /// unlabeled column and legend entry.
    #[error("workload name must not be empty")]
    EmptyName,

    /// Writing a rendered chart failed.
    #[error("failed to write chart {path}: {source}")]
    ChartWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Io(e) => e,
            other => io::Error::other(other),
        }
    }
}
