use tsignore_core::TargetPaths;
use tsignore_operations::operations::AddIgnoresOptions;
use tsignore_project::ToolConfig;

use crate::Cli;

/// Skip pattern applied when neither the command line nor a config file names any.
pub(crate) const DEFAULT_SKIP_PATTERN: &str = "node_modules/";

#[derive(Debug)]
pub(crate) struct RunSettings {
    pub(crate) target: TargetPaths,
    pub(crate) options: AddIgnoresOptions,
}

impl RunSettings {
    /// Config file entries come first, command line entries are appended. An
    /// explicit `--ts-config` wins over the config file.
    pub(crate) fn merge(cli: &Cli, config: Option<ToolConfig>) -> Self {
        let config = config.unwrap_or_default();

        let files = concat(config.files, &cli.files);
        let allowed_dependencies = concat(config.allow, &cli.allow);
        let mut skip_patterns = concat(config.skip_files, &cli.skip);
        if skip_patterns.is_empty() {
            skip_patterns.push(DEFAULT_SKIP_PATTERN.to_string());
        }

        let mut target = TargetPaths::new().with_declaration_files(files);
        if let Some(ts_config) = cli.ts_config.clone().or(config.ts_config_file_path) {
            target = target.with_ts_config(ts_config);
        }

        Self {
            target,
            options: AddIgnoresOptions {
                allowed_dependencies,
                skip_patterns,
                dry_run: cli.dry_run,
                debug: cli.debug,
                resolve_with_cwd: true,
            },
        }
    }
}

fn concat(mut first: Vec<String>, second: &[String]) -> Vec<String> {
    first.extend_from_slice(second);
    first
}
