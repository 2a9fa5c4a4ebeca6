use std::path::{Path, PathBuf};

use tracing::debug;
use tsignore_core::ResolvedTarget;
use tsignore_suppress::SourceFile;

use crate::Result;
use crate::error::OperationError;
use crate::traits::{SourceReader, SourceWriter};

/// Declaration files of one run, loaded and parsed, plus where they came from.
///
/// Owned by the running operation for its whole duration.
#[derive(Debug)]
pub struct Project {
    target: ResolvedTarget,
    files: Vec<SourceFile>,
}

impl Project {
    /// Reads and parses every resolved declaration file, in resolved order.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::SourceRead` when a file cannot be read and
    /// `OperationError::SourceLoad` when it cannot be parsed.
    pub fn load(target: ResolvedTarget, reader: &impl SourceReader) -> Result<Self> {
        let files = target
            .declaration_file_paths
            .iter()
            .map(|path| {
                let text = reader.read_source(path)?;
                SourceFile::parse(path.clone(), text).map_err(|source| {
                    OperationError::SourceLoad {
                        path: path.clone(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            project_dir = %target.project_dir_path.display(),
            files = files.len(),
            "loaded declaration files"
        );
        Ok(Self { target, files })
    }

    #[must_use]
    pub fn project_dir(&self) -> &Path {
        &self.target.project_dir_path
    }

    #[must_use]
    pub fn ts_config_file_path(&self) -> &Path {
        &self.target.ts_config_file_path
    }

    #[must_use]
    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    pub(crate) fn files_mut(&mut self) -> &mut [SourceFile] {
        &mut self.files
    }

    /// Writes back every file that was changed. Returns the paths written.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::SourceSave` for the first file that cannot be
    /// written; files saved before it stay saved.
    pub fn save_modified(&self, writer: &impl SourceWriter) -> Result<Vec<PathBuf>> {
        let mut saved = Vec::new();
        for file in self.files.iter().filter(|file| file.is_modified()) {
            writer.write_source(file.path(), file.text())?;
            debug!(path = %file.path().display(), "saved declaration file");
            saved.push(file.path().to_path_buf());
        }
        Ok(saved)
    }
}

/// Path of a file for display, relative to the project directory when it
/// lies inside it.
pub(crate) fn relative_display(project_dir: &Path, path: &Path) -> String {
    path.strip_prefix(project_dir)
        .unwrap_or(path)
        .display()
        .to_string()
}
