use std::path::{Path, PathBuf};

use tsignore_core::TS_CONFIG_FILE_NAME;

pub const PACKAGE_MANIFEST: &str = "package.json";

/// Finds the closest directory at or above `start` that holds a `package.json`.
#[must_use]
pub fn find_package_dir(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(PACKAGE_MANIFEST).is_file())
        .map(Path::to_path_buf)
}

/// Looks for `tsconfig.json` directly in `dir`, then in the package root above it.
#[must_use]
pub fn locate_ts_config(dir: &Path) -> Option<PathBuf> {
    let direct = dir.join(TS_CONFIG_FILE_NAME);
    if direct.is_file() {
        return Some(direct);
    }

    let in_package_root = find_package_dir(dir)?.join(TS_CONFIG_FILE_NAME);
    in_package_root.is_file().then_some(in_package_root)
}

/// Knows about the package of the program embedding this library.
///
/// When the library runs inside another tool, that tool's package directory is a
/// better guess for the project than whatever directory the process started in.
pub trait HostPackageLocator: Send + Sync {
    fn host_package_dir(&self) -> Option<PathBuf>;

    /// Package directory this tool itself is installed in. A host package equal
    /// to it is not a host at all.
    fn own_package_dir(&self) -> Option<PathBuf>;

    fn distinct_host_dir(&self) -> Option<PathBuf> {
        let host = self.host_package_dir()?;
        match self.own_package_dir() {
            Some(own) if own == host => None,
            _ => Some(host),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoHostPackage;

impl HostPackageLocator for NoHostPackage {
    fn host_package_dir(&self) -> Option<PathBuf> {
        None
    }

    fn own_package_dir(&self) -> Option<PathBuf> {
        None
    }
}

#[derive(Debug, Clone)]
pub struct FixedHostPackage {
    host: PathBuf,
    own: Option<PathBuf>,
}

impl FixedHostPackage {
    #[must_use]
    pub fn new(host: impl Into<PathBuf>) -> Self {
        Self {
            host: host.into(),
            own: None,
        }
    }

    #[must_use]
    pub fn with_own_package_dir(mut self, own: impl Into<PathBuf>) -> Self {
        self.own = Some(own.into());
        self
    }
}

impl HostPackageLocator for FixedHostPackage {
    fn host_package_dir(&self) -> Option<PathBuf> {
        Some(self.host.clone())
    }

    fn own_package_dir(&self) -> Option<PathBuf> {
        self.own.clone()
    }
}
