use std::path::Path;

use crate::Result;

pub trait SourceReader: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the file cannot be read as UTF-8 text.
    fn read_source(&self, path: &Path) -> Result<String>;
}

pub trait SourceWriter: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn write_source(&self, path: &Path, text: &str) -> Result<()>;
}

impl<T: SourceReader> SourceReader for &T {
    fn read_source(&self, path: &Path) -> Result<String> {
        (**self).read_source(path)
    }
}

impl<T: SourceWriter> SourceWriter for &T {
    fn write_source(&self, path: &Path, text: &str) -> Result<()> {
        (**self).write_source(path, text)
    }
}
