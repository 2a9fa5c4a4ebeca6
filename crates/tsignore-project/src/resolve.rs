use std::path::{Path, PathBuf};

use tracing::debug;
use tsignore_core::{
    DEFAULT_DECLARATION_FILE, LogEntry, NoopLog, ProcessWorkingDir, ResolvedTarget, TargetPaths,
    VerboseLog, WorkingDirProvider,
};

use crate::discovery::{HostPackageLocator, NoHostPackage, locate_ts_config};
use crate::error::ResolveError;
use crate::globbing::{
    GlobbedPathsOptions, has_glob_pattern, normalize_path, resolve_possibly_globbed_paths,
};
use crate::skip::{SkipRules, shared_top_path};

/// Policy and collaborators for [`resolve_target_paths`].
#[derive(Clone, Copy)]
pub struct ResolveOptions<'a> {
    /// Fall back to the working directory when nothing else points at a project.
    pub resolve_with_cwd: bool,
    /// Gitignore-style patterns applied to the final declaration file list.
    pub skip_patterns: &'a [String],
    pub log: &'a dyn VerboseLog,
    pub working_dir: &'a dyn WorkingDirProvider,
    pub host: &'a dyn HostPackageLocator,
}

impl Default for ResolveOptions<'_> {
    fn default() -> Self {
        Self {
            resolve_with_cwd: false,
            skip_patterns: &[],
            log: &NoopLog,
            working_dir: &ProcessWorkingDir,
            host: &NoHostPackage,
        }
    }
}

/// Works out which `tsconfig.json`, project directory and declaration files a
/// run operates on.
///
/// The tsconfig location is searched for in order: explicit argument, the
/// directory of the first explicitly named declaration file, the host package,
/// then the working directory (only with `resolve_with_cwd`). The project
/// directory always ends up as the directory of the tsconfig file.
///
/// # Errors
///
/// Returns `ResolveError::ConfigNotFound` or `ResolveError::ConfigMissing` when no
/// tsconfig file can be located, and `ResolveError::DeclarationPaths` wrapping the
/// cause when a declaration file entry cannot be resolved.
pub fn resolve_target_paths(
    paths: Option<&TargetPaths>,
    options: &ResolveOptions<'_>,
) -> Result<ResolvedTarget, ResolveError> {
    let paths = paths.cloned().unwrap_or_default();
    let log = options.log;

    let entries = if paths.declaration_file_paths.is_empty() {
        vec![DEFAULT_DECLARATION_FILE.to_string()]
    } else {
        paths.declaration_file_paths
    };
    let mut project_dir = paths.project_dir_path;
    let mut ts_config = match paths.ts_config_file_path {
        Some(path) if path.is_relative() => {
            Some(normalize_path(&options.working_dir.working_dir()?.join(path)))
        }
        other => other,
    };

    if ts_config.is_none() {
        if project_dir.is_none() && !has_glob_pattern(&entries) {
            let first = resolve_possibly_globbed_paths(
                &entries,
                None,
                GlobbedPathsOptions {
                    allow_relative: true,
                    ignore_missing_files: false,
                    log: &NoopLog,
                },
            )?
            .into_iter()
            .next();

            if let Some(first) = first.filter(|path| path.is_absolute()) {
                project_dir = first.parent().map(Path::to_path_buf);
                log.log(
                    &LogEntry::new("Path will be based on first declaration file:")
                        .message(&first.to_string_lossy())
                        .dimmed(),
                );
            }
        }

        if project_dir.is_none() {
            if let Some(host_dir) = options.host.distinct_host_dir() {
                log.log(
                    &LogEntry::new("Path will be based on main package:")
                        .message(&host_dir.to_string_lossy())
                        .dimmed(),
                );
                project_dir = Some(host_dir);
            }
        }

        let cwd = if options.resolve_with_cwd {
            Some(options.working_dir.working_dir()?)
        } else {
            None
        };

        if let Some(cwd) = cwd.as_ref().filter(|_| project_dir.is_none()) {
            let found = resolve_possibly_globbed_paths(
                &entries,
                Some(cwd),
                GlobbedPathsOptions {
                    allow_relative: false,
                    ignore_missing_files: true,
                    log: &NoopLog,
                },
            )?;

            if found.first().is_some_and(|path| path.is_absolute()) {
                log.log(
                    &LogEntry::new("File found at current working directory, setting path:")
                        .message(&cwd.to_string_lossy())
                        .dimmed(),
                );
                project_dir = Some(cwd.clone());
            }
        }

        if let Some(search_dir) = project_dir.as_ref().or(cwd.as_ref()) {
            ts_config = locate_ts_config(search_dir);
            match &ts_config {
                Some(found) => {
                    debug!(search_dir = %search_dir.display(), ts_config = %found.display(), "located tsconfig.json");
                    log.log(
                        &LogEntry::new("Resolved tsconfig.json using path:")
                            .message(&found.to_string_lossy())
                            .dimmed(),
                    );
                }
                None => {
                    debug!(search_dir = %search_dir.display(), "no tsconfig.json near search directory");
                }
            }
        }
    }

    let ts_config = ts_config.ok_or(ResolveError::ConfigNotFound)?;
    if !ts_config.is_file() {
        return Err(ResolveError::ConfigMissing { path: ts_config });
    }
    let ts_config_dir = ts_config
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| ResolveError::ConfigMissing {
            path: ts_config.clone(),
        })?;

    let base_dir = match project_dir {
        Some(dir) => dir,
        None => {
            log.log(
                &LogEntry::new("Setting path to that of tsconfig.json:")
                    .message(&ts_config_dir.to_string_lossy())
                    .dimmed(),
            );
            ts_config_dir.clone()
        }
    };

    log.log(
        &LogEntry::new("Resolving declaration paths:")
            .message(&format!("{} paths", entries.len()))
            .extras(&base_dir.to_string_lossy())
            .dimmed(),
    );
    let declaration_files = resolve_possibly_globbed_paths(
        &entries,
        Some(&base_dir),
        GlobbedPathsOptions {
            allow_relative: false,
            ignore_missing_files: false,
            log,
        },
    )
    .map_err(|err| ResolveError::DeclarationPaths(Box::new(err)))?;
    log.log(
        &LogEntry::new("Declaration files found:")
            .message(&format!("{} files", declaration_files.len()))
            .dimmed(),
    );

    let declaration_files = apply_skip_patterns(
        declaration_files,
        &ts_config_dir,
        options.skip_patterns,
        log,
    )?;

    log.log(
        &LogEntry::new("Declaration files to use:")
            .message(&format!("{} files", declaration_files.len()))
            .dimmed(),
    );
    debug!(
        ts_config = %ts_config.display(),
        files = declaration_files.len(),
        "resolved target paths"
    );

    Ok(ResolvedTarget {
        declaration_file_paths: declaration_files,
        project_dir_path: ts_config_dir,
        ts_config_file_path: ts_config,
    })
}

fn apply_skip_patterns(
    files: Vec<PathBuf>,
    ts_config_dir: &Path,
    patterns: &[String],
    log: &dyn VerboseLog,
) -> Result<Vec<PathBuf>, ResolveError> {
    let Some(first_dir) = files.first().and_then(|first| first.parent()) else {
        return Ok(files);
    };
    let top = shared_top_path(ts_config_dir, first_dir);

    let Some(rules) = SkipRules::build(&top, patterns)? else {
        return Ok(files);
    };

    log.log(
        &LogEntry::new("Applying ignore rules:")
            .message(&format!("{} rules", rules.pattern_count()))
            .dimmed(),
    );
    let before = files.len();
    let kept = rules.filter(files);
    log.log(
        &LogEntry::new("Ignored declaration files:")
            .message(&format!("{} files", before - kept.len()))
            .dimmed(),
    );

    Ok(kept)
}
