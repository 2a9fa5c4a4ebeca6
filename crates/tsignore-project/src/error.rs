use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Can not figure out where to look for tsconfig.json file")]
    ConfigNotFound,

    #[error("No file at expected tsconfig.json location: {}", path.display())]
    ConfigMissing { path: PathBuf },

    #[error("Failed to find file: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error(
        "Invalid file path. Either a relative directory or an absolute path is required, but got: {entry}"
    )]
    InvalidPath { entry: String },

    #[error("Encountered glob patterns, but couldn't figure out what path to resolve them to")]
    GlobWithoutBase,

    #[error("invalid glob pattern '{pattern}'")]
    GlobPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("invalid skip pattern '{pattern}'")]
    SkipPattern {
        pattern: String,
        #[source]
        source: ignore::Error,
    },

    #[error("Failed to resolve declaration paths")]
    DeclarationPaths(#[source] Box<ResolveError>),

    #[error("IO error")]
    Io(#[from] std::io::Error),
}

impl ResolveError {
    /// Both the "nothing discovered" and the "discovered but absent" cases count
    /// as a missing project configuration.
    #[must_use]
    pub fn is_config_not_found(&self) -> bool {
        matches!(self, Self::ConfigNotFound | Self::ConfigMissing { .. })
    }

    /// Looks through [`ResolveError::DeclarationPaths`] wrappers.
    #[must_use]
    pub fn root_cause(&self) -> &ResolveError {
        match self {
            Self::DeclarationPaths(inner) => inner.root_cause(),
            other => other,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON config file '{}'", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse YAML config file '{}'", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },

    #[error("failed to parse TOML config file '{}'", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
