use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SuppressError {
    #[error("failed to load the TypeScript grammar")]
    Language(#[from] tree_sitter::LanguageError),

    #[error("failed to parse '{}'", path.display())]
    Parse { path: PathBuf },

    #[error("cannot insert at offset {offset} of '{}' ({len} bytes)", path.display())]
    InvalidInsertion {
        path: PathBuf,
        offset: usize,
        len: usize,
    },
}
