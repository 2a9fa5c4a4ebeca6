use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to load ts-ignore-import configuration")]
    Config(#[from] tsignore_project::ConfigError),

    #[error(transparent)]
    Operation(#[from] tsignore_operations::OperationError),

    #[error("failed to determine the current directory")]
    WorkingDir(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
