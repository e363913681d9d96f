use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StampError {
    #[error("opencv: {0}")]
    OpenCv(#[from] opencv::Error),

    #[error("failed to list {path:?}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write report {path:?}: {source}")]
    Report {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("environment variable {0} is not set")]
    MissingConfig(&'static str),
}

pub type Result<T> = std::result::Result<T, StampError>;
