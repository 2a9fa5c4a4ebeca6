use std::path::PathBuf;

use indexmap::IndexSet;
use tracing::debug;
use tsignore_core::{
    IgnoreSet, LogEntry, NoopLog, ProcessWorkingDir, TargetPaths, VerboseLog, WorkingDirProvider,
};
use tsignore_project::{HostPackageLocator, NoHostPackage, ResolveOptions, resolve_target_paths};
use tsignore_suppress::{SourceFile, suppress_external_imports};

use crate::Result;
use crate::error::OperationError;
use crate::project::{Project, relative_display};
use crate::traits::{SourceReader, SourceWriter};

/// Upper bound on suppression passes over a single file.
pub const MAX_PASSES: usize = 8;

#[derive(Debug, Clone, Default)]
pub struct AddIgnoresOptions {
    /// Module names (and their sub-paths) that are never suppressed.
    pub allowed_dependencies: Vec<String>,
    pub skip_patterns: Vec<String>,
    pub dry_run: bool,
    /// Also report imports that were suppressed before the run.
    pub debug: bool,
    pub resolve_with_cwd: bool,
}

/// Collaborators a run talks to besides the file system.
#[derive(Clone, Copy)]
pub struct AddIgnoresEnvironment<'a> {
    pub log: &'a dyn VerboseLog,
    pub working_dir: &'a dyn WorkingDirProvider,
    pub host: &'a dyn HostPackageLocator,
}

impl Default for AddIgnoresEnvironment<'_> {
    fn default() -> Self {
        Self {
            log: &NoopLog,
            working_dir: &ProcessWorkingDir,
            host: &NoHostPackage,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddIgnoresOutput {
    /// Every external module found across all files, suppressed now or before.
    pub ignored: IndexSet<String>,
    pub source_file_count: usize,
    /// Files that received at least one new marker.
    pub modified_files: Vec<PathBuf>,
}

#[derive(Default)]
struct FileOutcome {
    ignore_set: IgnoreSet,
    newly_suppressed: IndexSet<String>,
    already_suppressed: IndexSet<String>,
}

pub struct AddIgnoresOperation<S> {
    io: S,
}

impl<S> AddIgnoresOperation<S>
where
    S: SourceReader + SourceWriter,
{
    pub fn new(io: S) -> Self {
        Self { io }
    }

    /// Resolves the target, suppresses every external import of every
    /// declaration file and saves the changed files unless `dry_run` is set.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::Resolve` if the project cannot be resolved, a
    /// load error for the first unreadable or unparsable file, and a processing
    /// error if suppression fails or does not settle. Nothing is saved unless
    /// every file was processed.
    pub fn execute(
        &self,
        target: Option<&TargetPaths>,
        options: &AddIgnoresOptions,
        environment: &AddIgnoresEnvironment<'_>,
    ) -> Result<AddIgnoresOutput> {
        let log = environment.log;
        let resolved = resolve_target_paths(
            target,
            &ResolveOptions {
                resolve_with_cwd: options.resolve_with_cwd,
                skip_patterns: &options.skip_patterns,
                log,
                working_dir: environment.working_dir,
                host: environment.host,
            },
        )?;

        let mut project = Project::load(resolved, &self.io)?;
        let project_dir = project.project_dir().to_path_buf();
        let mut ignored = IndexSet::new();

        for file in project.files_mut() {
            let outcome = add_file_ignores(file, &options.allowed_dependencies)?;
            let display_path = relative_display(&project_dir, file.path());

            if options.debug && !outcome.already_suppressed.is_empty() {
                log.log(
                    &LogEntry::new("Already ignored:")
                        .message(&display_path)
                        .extras(&join(&outcome.already_suppressed))
                        .dimmed(),
                );
            }
            if !outcome.newly_suppressed.is_empty() {
                log.log(
                    &LogEntry::new(&format!("Ignored {} for:", outcome.newly_suppressed.len()))
                        .message(&display_path)
                        .extras(&join(&outcome.newly_suppressed)),
                );
            }

            ignored.extend(outcome.ignore_set);
        }

        let modified_files = if options.dry_run {
            let pending: Vec<PathBuf> = project
                .files()
                .iter()
                .filter(|file| file.is_modified())
                .map(|file| file.path().to_path_buf())
                .collect();
            debug!(files = pending.len(), "dry run, skipping save");
            pending
        } else {
            project.save_modified(&self.io)?
        };

        Ok(AddIgnoresOutput {
            ignored,
            source_file_count: project.files().len(),
            modified_files,
        })
    }
}

fn add_file_ignores(file: &mut SourceFile, allowed: &[String]) -> Result<FileOutcome> {
    let mut outcome = FileOutcome::default();

    for pass in 0..MAX_PASSES {
        let result = suppress_external_imports(file, allowed, &mut outcome.ignore_set).map_err(
            |source| OperationError::Processing {
                path: file.path().to_path_buf(),
                source,
            },
        )?;

        if pass == 0 {
            outcome.already_suppressed.extend(result.already_suppressed);
        }
        outcome.newly_suppressed.extend(result.newly_suppressed);

        if result.insertions == 0 {
            debug!(path = %file.path().display(), passes = pass + 1, "file settled");
            return Ok(outcome);
        }
    }

    Err(OperationError::NotConverged {
        path: file.path().to_path_buf(),
        passes: MAX_PASSES,
    })
}

fn join(names: &IndexSet<String>) -> String {
    names
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use tsignore_core::FixedWorkingDir;
    use tsignore_project::ResolveError;

    use super::*;
    use crate::mocks::{MemorySourceIO, RecordingLog};

    fn scratch_project(declaration: &str) -> anyhow::Result<tempfile::TempDir> {
        let dir = tempfile::tempdir()?;
        std::fs::write(dir.path().join("tsconfig.json"), "{}\n")?;
        std::fs::write(dir.path().join("index.d.ts"), declaration)?;
        Ok(dir)
    }

    #[test]
    fn empty_target_without_cwd_fails_to_resolve() {
        let operation = AddIgnoresOperation::new(MemorySourceIO::new());

        let err = operation
            .execute(
                None,
                &AddIgnoresOptions::default(),
                &AddIgnoresEnvironment::default(),
            )
            .expect_err("nothing to resolve");

        assert!(matches!(err, OperationError::Resolve(ResolveError::ConfigNotFound)));
    }

    #[test]
    fn suppresses_and_saves_through_io() -> anyhow::Result<()> {
        let dir = scratch_project("")?;
        let declaration = dir.path().join("index.d.ts");
        let io = MemorySourceIO::new().with_file(&declaration, "import got from 'got';\n");
        let log = RecordingLog::default();
        let working_dir = FixedWorkingDir::new(dir.path());
        let environment = AddIgnoresEnvironment {
            log: &log,
            working_dir: &working_dir,
            ..AddIgnoresEnvironment::default()
        };
        let options = AddIgnoresOptions {
            resolve_with_cwd: true,
            ..AddIgnoresOptions::default()
        };

        let output = AddIgnoresOperation::new(&io).execute(None, &options, &environment)?;

        assert_eq!(output.source_file_count, 1);
        assert!(output.ignored.contains("got"));
        assert_eq!(io.writes(), vec![declaration.clone()]);
        assert_eq!(
            io.contents(&declaration).as_deref(),
            Some("// @ts-ignore\nimport got from 'got';\n")
        );
        assert!(log.entries().contains(&(
            "Ignored 1 for:".to_string(),
            Some("index.d.ts".to_string()),
            Some("got".to_string())
        )));
        Ok(())
    }

    #[test]
    fn dry_run_reports_without_saving() -> anyhow::Result<()> {
        let dir = scratch_project("")?;
        let declaration = dir.path().join("index.d.ts");
        let io = MemorySourceIO::new()
            .with_file(&declaration, "import a from 'a';\n")
            .read_only();
        let target = TargetPaths::new().with_ts_config(dir.path().join("tsconfig.json"));
        let options = AddIgnoresOptions {
            dry_run: true,
            ..AddIgnoresOptions::default()
        };

        let output = AddIgnoresOperation::new(&io).execute(
            Some(&target),
            &options,
            &AddIgnoresEnvironment::default(),
        )?;

        assert_eq!(output.modified_files, vec![declaration.clone()]);
        assert!(io.writes().is_empty());
        assert_eq!(
            io.contents(&declaration).as_deref(),
            Some("import a from 'a';\n")
        );
        Ok(())
    }

    #[test]
    fn save_failure_is_reported() -> anyhow::Result<()> {
        let dir = scratch_project("")?;
        let declaration = dir.path().join("index.d.ts");
        let io = MemorySourceIO::new()
            .with_file(&declaration, "import a from 'a';\n")
            .read_only();
        let target = TargetPaths::new().with_ts_config(dir.path().join("tsconfig.json"));

        let err = AddIgnoresOperation::new(&io)
            .execute(
                Some(&target),
                &AddIgnoresOptions::default(),
                &AddIgnoresEnvironment::default(),
            )
            .expect_err("read-only io");

        assert!(matches!(err, OperationError::SourceSave { ref path, .. } if path == &declaration));
        Ok(())
    }

    #[test]
    fn already_ignored_imports_are_reported_in_debug_mode() -> anyhow::Result<()> {
        let dir = scratch_project("")?;
        let declaration = dir.path().join("index.d.ts");
        let io = MemorySourceIO::new().with_file(
            &declaration,
            "// @ts-ignore\nimport a from 'a';\nimport b from 'b';\n",
        );
        let log = RecordingLog::default();
        let target = TargetPaths::new().with_ts_config(dir.path().join("tsconfig.json"));
        let options = AddIgnoresOptions {
            debug: true,
            ..AddIgnoresOptions::default()
        };
        let environment = AddIgnoresEnvironment {
            log: &log,
            ..AddIgnoresEnvironment::default()
        };

        let output = AddIgnoresOperation::new(&io).execute(Some(&target), &options, &environment)?;

        assert_eq!(
            output.ignored.iter().collect::<Vec<_>>(),
            vec!["a", "b"]
        );
        assert!(log.entries().contains(&(
            "Already ignored:".to_string(),
            Some("index.d.ts".to_string()),
            Some("a".to_string())
        )));
        assert!(log.has_title("Ignored 1 for:"));
        Ok(())
    }

    #[test]
    fn allowed_dependencies_are_left_alone() -> anyhow::Result<()> {
        let dir = scratch_project("")?;
        let declaration = dir.path().join("index.d.ts");
        let source = "import a from 'allowed/sub';\n";
        let io = MemorySourceIO::new().with_file(&declaration, source);
        let target = TargetPaths::new().with_ts_config(dir.path().join("tsconfig.json"));
        let options = AddIgnoresOptions {
            allowed_dependencies: vec!["allowed".to_string()],
            ..AddIgnoresOptions::default()
        };

        let output = AddIgnoresOperation::new(&io).execute(
            Some(&target),
            &options,
            &AddIgnoresEnvironment::default(),
        )?;

        assert!(output.ignored.is_empty());
        assert!(output.modified_files.is_empty());
        assert_eq!(
            io.contents(&declaration).as_deref(),
            Some(source)
        );
        Ok(())
    }
}
