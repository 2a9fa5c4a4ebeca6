use std::path::PathBuf;

/// Source of the directory relative entries fall back to when resolving with the
/// current working directory.
pub trait WorkingDirProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the directory cannot be determined.
    fn working_dir(&self) -> std::io::Result<PathBuf>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessWorkingDir;

impl WorkingDirProvider for ProcessWorkingDir {
    fn working_dir(&self) -> std::io::Result<PathBuf> {
        std::env::current_dir()
    }
}

#[derive(Debug, Clone)]
pub struct FixedWorkingDir(PathBuf);

impl FixedWorkingDir {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }
}

impl WorkingDirProvider for FixedWorkingDir {
    fn working_dir(&self) -> std::io::Result<PathBuf> {
        Ok(self.0.clone())
    }
}

impl<T: WorkingDirProvider + ?Sized> WorkingDirProvider for &T {
    fn working_dir(&self) -> std::io::Result<PathBuf> {
        (**self).working_dir()
    }
}
