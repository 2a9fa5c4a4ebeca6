use std::path::PathBuf;

use thiserror::Error;
use tsignore_project::ResolveError;
use tsignore_suppress::SuppressError;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("failed to read declaration file '{}'", path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load declaration file '{}'", path.display())]
    SourceLoad {
        path: PathBuf,
        #[source]
        source: SuppressError,
    },

    #[error("failed to add ignores to '{}'", path.display())]
    Processing {
        path: PathBuf,
        #[source]
        source: SuppressError,
    },

    #[error("ignores in '{}' did not settle after {passes} passes", path.display())]
    NotConverged { path: PathBuf, passes: usize },

    #[error("failed to save declaration file '{}'", path.display())]
    SourceSave {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, OperationError>;
