use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::discovery::PACKAGE_MANIFEST;
use crate::error::ConfigError;
use crate::globbing::normalize_path;

/// Key under which the tool reads its settings from `package.json`.
pub const CONFIG_KEY: &str = "ts-ignore-import";

const RC_FILES: &[&str] = &[
    ".ts-ignore-importrc",
    ".ts-ignore-importrc.json",
    ".ts-ignore-importrc.yaml",
    ".ts-ignore-importrc.yml",
    ".ts-ignore-importrc.toml",
    "ts-ignore-import.config.json",
];

/// Settings a project can commit next to its sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolConfig {
    /// Module names (and their sub-paths) that are never suppressed.
    #[serde(default)]
    pub allow: Vec<String>,
    /// Gitignore-style patterns of declaration files to leave untouched.
    #[serde(default)]
    pub skip_files: Vec<String>,
    /// Declaration files or globs to process.
    #[serde(default)]
    pub files: Vec<String>,
    pub ts_config_file_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedToolConfig {
    pub path: PathBuf,
    pub config: ToolConfig,
}

#[derive(Debug, Deserialize)]
struct PackageManifest {
    #[serde(rename = "ts-ignore-import")]
    tool: Option<ToolConfig>,
}

/// Searches `start_dir` and its ancestors for tool settings.
///
/// In each directory a `package.json` carrying a `"ts-ignore-import"` key wins,
/// followed by the rc files. The first directory with a match ends the search. A
/// relative `tsConfigFilePath` or `files` entry is resolved against the
/// directory of the file it was read from.
///
/// # Errors
///
/// Returns `ConfigError` if a candidate file exists but cannot be read or parsed.
pub fn load_tool_config(start_dir: &Path) -> Result<Option<LoadedToolConfig>, ConfigError> {
    for dir in start_dir.ancestors() {
        if let Some(loaded) = load_from_dir(dir)? {
            debug!(path = %loaded.path.display(), "loaded tool config");
            return Ok(Some(loaded.resolve_relative_paths()));
        }
    }
    Ok(None)
}

fn load_from_dir(dir: &Path) -> Result<Option<LoadedToolConfig>, ConfigError> {
    let manifest_path = dir.join(PACKAGE_MANIFEST);
    if manifest_path.is_file() {
        let content = read(&manifest_path)?;
        let manifest: PackageManifest =
            serde_json::from_str(&content).map_err(|source| ConfigError::Json {
                path: manifest_path.clone(),
                source,
            })?;
        if let Some(config) = manifest.tool {
            return Ok(Some(LoadedToolConfig {
                path: manifest_path,
                config,
            }));
        }
    }

    for name in RC_FILES {
        let path = dir.join(name);
        if path.is_file() {
            let config = parse_rc_file(&path)?;
            return Ok(Some(LoadedToolConfig { path, config }));
        }
    }

    Ok(None)
}

fn parse_rc_file(path: &Path) -> Result<ToolConfig, ConfigError> {
    let content = read(path)?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        }),
        Some("toml") => toml::from_str(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        }),
        // Extension-less rc files may hold JSON, which YAML reads as well.
        _ if content.trim().is_empty() => Ok(ToolConfig::default()),
        _ => serde_yml::from_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}

impl LoadedToolConfig {
    fn resolve_relative_paths(mut self) -> Self {
        let Some(base) = self.path.parent().map(Path::to_path_buf) else {
            return self;
        };
        if let Some(ts_config) = self.config.ts_config_file_path.as_mut() {
            if ts_config.is_relative() {
                *ts_config = normalize_path(&base.join(&*ts_config));
            }
        }
        for entry in &mut self.config.files {
            if Path::new(entry.as_str()).is_relative() {
                *entry = base.join(entry.as_str()).to_string_lossy().into_owned();
            }
        }
        self
    }
}
