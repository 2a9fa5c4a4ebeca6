use std::fs;
use std::path::Path;

use crate::Result;
use crate::error::OperationError;
use crate::traits::{SourceReader, SourceWriter};

/// Reads and writes declaration files in place.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystemSourceIO;

impl FileSystemSourceIO {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SourceReader for FileSystemSourceIO {
    fn read_source(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|source| OperationError::SourceRead {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl SourceWriter for FileSystemSourceIO {
    fn write_source(&self, path: &Path, text: &str) -> Result<()> {
        fs::write(path, text).map_err(|source| OperationError::SourceSave {
            path: path.to_path_buf(),
            source,
        })
    }
}
