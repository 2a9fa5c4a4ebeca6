use std::path::{Path, PathBuf};

use tracing::debug;
use tsignore_core::FixedWorkingDir;
use tsignore_operations::operations::{
    AddIgnoresEnvironment, AddIgnoresOperation, AddIgnoresOutput,
};
use tsignore_operations::providers::FileSystemSourceIO;
use tsignore_project::{NoHostPackage, load_tool_config, normalize_path};

use crate::Cli;
use crate::error::{CliError, Result};
use crate::output::ConsoleLog;
use crate::settings::RunSettings;

pub(crate) fn run(cli: &Cli) -> Result<AddIgnoresOutput> {
    let start_dir = resolve_start_path(cli.path.as_deref())?;

    let loaded = load_tool_config(&start_dir)?;
    if let Some(loaded) = &loaded {
        debug!(path = %loaded.path.display(), "using tool config");
    }
    let settings = RunSettings::merge(cli, loaded.map(|loaded| loaded.config));
    debug!(?settings, "merged settings");

    let log = ConsoleLog::new(cli.verbosity());
    let working_dir = FixedWorkingDir::new(&start_dir);
    let environment = AddIgnoresEnvironment {
        log: &log,
        working_dir: &working_dir,
        host: &NoHostPackage,
    };

    let output = AddIgnoresOperation::new(FileSystemSourceIO::new()).execute(
        Some(&settings.target),
        &settings.options,
        &environment,
    )?;
    Ok(output)
}

fn resolve_start_path(path: Option<&Path>) -> Result<PathBuf> {
    let cwd = || std::env::current_dir().map_err(CliError::WorkingDir);
    match path {
        Some(p) if p.is_absolute() => Ok(p.to_path_buf()),
        Some(p) => Ok(normalize_path(&cwd()?.join(p))),
        None => cwd(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_start_path_is_kept() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;

        assert_eq!(resolve_start_path(Some(dir.path()))?, dir.path());
        Ok(())
    }

    #[test]
    fn relative_start_path_is_joined_to_cwd() -> anyhow::Result<()> {
        let resolved = resolve_start_path(Some(Path::new("./types")))?;

        assert_eq!(resolved, std::env::current_dir()?.join("types"));
        Ok(())
    }
}
