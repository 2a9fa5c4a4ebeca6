use std::path::PathBuf;

use indexmap::IndexSet;

/// Default declaration file looked up when a caller names none.
pub const DEFAULT_DECLARATION_FILE: &str = "index.d.ts";

/// Name of the TypeScript project configuration file.
pub const TS_CONFIG_FILE_NAME: &str = "tsconfig.json";

/// Module names observed in one file, quotes stripped, in first-seen order.
pub type IgnoreSet = IndexSet<String>;

/// Partial description of what to operate on, as supplied by a caller.
///
/// Any part may be missing; the path resolver fills in the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetPaths {
    /// Paths or glob patterns, absolute or relative to the project directory.
    pub declaration_file_paths: Vec<String>,
    pub project_dir_path: Option<PathBuf>,
    pub ts_config_file_path: Option<PathBuf>,
}

impl TargetPaths {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_declaration_files<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declaration_file_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_project_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_dir_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_ts_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.ts_config_file_path = Some(path.into());
        self
    }
}

/// Fully resolved target of a run.
///
/// `project_dir_path` is always the directory holding `ts_config_file_path`,
/// and every declaration file was verified to exist during resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub declaration_file_paths: Vec<PathBuf>,
    pub project_dir_path: PathBuf,
    pub ts_config_file_path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_declaration_files() {
        let target = TargetPaths::new()
            .with_declaration_files(["index.d.ts", "lib/**/*.d.ts"])
            .with_ts_config("/project/tsconfig.json");

        assert_eq!(
            target.declaration_file_paths,
            vec!["index.d.ts".to_string(), "lib/**/*.d.ts".to_string()]
        );
        assert_eq!(
            target.ts_config_file_path,
            Some(PathBuf::from("/project/tsconfig.json"))
        );
        assert!(target.project_dir_path.is_none());
    }

    #[test]
    fn default_target_is_empty() {
        let target = TargetPaths::default();

        assert!(target.declaration_file_paths.is_empty());
        assert!(target.project_dir_path.is_none());
        assert!(target.ts_config_file_path.is_none());
    }
}
