use std::fs;
use std::path::{Component, Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use indexmap::IndexSet;
use tracing::debug;
use tsignore_core::{LogEntry, VerboseLog};

use crate::error::ResolveError;

#[derive(Clone, Copy)]
pub(crate) struct GlobbedPathsOptions<'a> {
    /// Pass relative entries through untouched when no base directory is known.
    pub(crate) allow_relative: bool,
    /// Drop explicit entries that do not exist instead of failing.
    pub(crate) ignore_missing_files: bool,
    pub(crate) log: &'a dyn VerboseLog,
}

fn has_glob_syntax(text: &str) -> bool {
    text.contains(['*', '?', '[', ']', '{', '}'])
}

fn negated(entry: &str) -> Option<&str> {
    entry.strip_prefix('!')
}

/// Whether `entry` is a glob pattern, including `!pattern` exclusions.
#[must_use]
pub fn is_glob_pattern(entry: &str) -> bool {
    negated(entry).is_some() || has_glob_syntax(entry)
}

#[must_use]
pub fn has_glob_pattern(entries: &[String]) -> bool {
    entries.iter().any(|entry| is_glob_pattern(entry))
}

/// Lexically normalizes `path`, folding `.` and `..` without touching the disk.
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// A glob split into the literal directory it starts from and the pattern
/// matched below that directory.
struct RootedGlob {
    root: PathBuf,
    matcher: GlobMatcher,
    include_hidden: bool,
}

impl RootedGlob {
    fn new(entry: &str, pattern: &str, base_dir: Option<&Path>) -> Result<Self, ResolveError> {
        let mut root = PathBuf::new();
        let mut rest: Vec<String> = Vec::new();
        for component in Path::new(pattern).components() {
            let text = component.as_os_str().to_string_lossy();
            if rest.is_empty() && !has_glob_syntax(&text) {
                root.push(component);
            } else {
                rest.push(text.into_owned());
            }
        }
        if rest.is_empty() {
            if let Some(name) = root.file_name() {
                rest.push(globset::escape(&name.to_string_lossy()));
                root.pop();
            }
        }

        let root = if root.is_absolute() {
            normalize_path(&root)
        } else {
            let base_dir = base_dir.ok_or(ResolveError::GlobWithoutBase)?;
            normalize_path(&base_dir.join(root))
        };
        let rest = rest.join("/");
        let matcher = GlobBuilder::new(&rest)
            .literal_separator(true)
            .build()
            .map_err(|source| ResolveError::GlobPattern {
                pattern: entry.to_string(),
                source,
            })?
            .compile_matcher();

        Ok(Self {
            root,
            include_hidden: rest.split('/').any(|part| part.starts_with('.')),
            matcher,
        })
    }

    /// Whether `path` or one of its directories below the root matches.
    fn covers(&self, path: &Path) -> bool {
        let Ok(relative) = path.strip_prefix(&self.root) else {
            return false;
        };
        relative
            .ancestors()
            .filter(|ancestor| !ancestor.as_os_str().is_empty())
            .any(|ancestor| self.matcher.is_match(ancestor))
    }

    fn collect_files(&self, current: &Path, results: &mut Vec<PathBuf>) -> Result<(), ResolveError> {
        let entries = match fs::read_dir(current) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        let mut children = Vec::new();
        for entry in entries {
            let entry = entry?;
            children.push((entry.path(), entry.file_type()?));
        }
        children.sort_by(|a, b| a.0.cmp(&b.0));

        for (path, file_type) in children {
            let hidden = path
                .file_name()
                .is_some_and(|name| name.to_string_lossy().starts_with('.'));
            if hidden && !self.include_hidden {
                continue;
            }

            if file_type.is_dir() {
                self.collect_files(&path, results)?;
                continue;
            }

            let relative = path.strip_prefix(&self.root).unwrap_or(&path);
            if self.matcher.is_match(relative) && path.is_file() {
                results.push(normalize_path(&path));
            }
        }

        Ok(())
    }
}

/// Turns declaration file entries into de-duplicated paths.
///
/// Entries with glob syntax (`*`, `?`, `[..]`, `{a,b}`) are expanded against
/// `base_dir`; `!pattern` entries remove matching files, or files below matching
/// directories, from the result whatever their position. Explicit entries must
/// exist unless `ignore_missing_files` is set.
pub(crate) fn resolve_possibly_globbed_paths(
    entries: &[String],
    base_dir: Option<&Path>,
    options: GlobbedPathsOptions<'_>,
) -> Result<Vec<PathBuf>, ResolveError> {
    let mut resolved: IndexSet<PathBuf> = IndexSet::new();

    if has_glob_pattern(entries) {
        let count = entries.len().to_string() + " paths";
        options.log.log(
            &LogEntry::new("Resolving globbed declaration file paths:")
                .message(&count)
                .extras(&entries.join(", "))
                .dimmed(),
        );
    }

    let exclusions = entries
        .iter()
        .filter_map(|entry| negated(entry).map(|pattern| (entry, pattern)))
        .map(|(entry, pattern)| RootedGlob::new(entry, pattern, base_dir))
        .collect::<Result<Vec<_>, _>>()?;

    for entry in entries.iter().filter(|entry| negated(entry).is_none()) {
        if has_glob_syntax(entry) {
            let glob = RootedGlob::new(entry, entry, base_dir)?;
            let mut matches = Vec::new();
            glob.collect_files(&glob.root, &mut matches)?;
            debug!(pattern = %entry, matches = matches.len(), "expanded glob pattern");
            resolved.extend(matches);
            continue;
        }

        let entry_path = Path::new(entry);
        let normalized = match base_dir {
            Some(base) => normalize_path(&base.join(entry_path)),
            None if entry_path.is_absolute() => normalize_path(entry_path),
            None if options.allow_relative => {
                resolved.insert(entry_path.to_path_buf());
                break;
            }
            None => {
                return Err(ResolveError::InvalidPath {
                    entry: entry.clone(),
                });
            }
        };

        if resolved.contains(&normalized) {
            continue;
        }

        if normalized.is_file() {
            resolved.insert(normalized);
        } else if !options.ignore_missing_files {
            return Err(ResolveError::FileNotFound { path: normalized });
        }
    }

    if !exclusions.is_empty() {
        let before = resolved.len();
        resolved.retain(|path| !exclusions.iter().any(|glob| glob.covers(path)));
        debug!(
            excluded = before - resolved.len(),
            "applied negated glob patterns"
        );
    }

    Ok(resolved.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;
    use tsignore_core::NoopLog;

    use super::*;

    fn options() -> GlobbedPathsOptions<'static> {
        GlobbedPathsOptions {
            allow_relative: false,
            ignore_missing_files: false,
            log: &NoopLog,
        }
    }

    fn declaration_tree() -> anyhow::Result<TempDir> {
        let dir = TempDir::new()?;
        fs::create_dir_all(dir.path().join("lib/nested"))?;
        fs::write(dir.path().join("index.d.ts"), "")?;
        fs::write(dir.path().join("lib/a.d.ts"), "")?;
        fs::write(dir.path().join("lib/nested/b.d.ts"), "")?;
        fs::write(dir.path().join("lib/c.js"), "")?;
        Ok(dir)
    }

    fn entries(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn detects_glob_metacharacters() {
        assert!(is_glob_pattern("**/*.d.ts"));
        assert!(is_glob_pattern("index.d.?s"));
        assert!(is_glob_pattern("lib/[ab].d.ts"));
        assert!(is_glob_pattern("{a,b}.d.ts"));
        assert!(is_glob_pattern("!legacy/old.d.ts"));
        assert!(!is_glob_pattern("lib/index.d.ts"));
    }

    fn legacy_tree() -> anyhow::Result<TempDir> {
        let dir = TempDir::new()?;
        fs::create_dir_all(dir.path().join("legacy"))?;
        fs::write(dir.path().join("a.d.ts"), "")?;
        fs::write(dir.path().join("b.d.ts"), "")?;
        fs::write(dir.path().join("legacy/old.d.ts"), "")?;
        fs::write(dir.path().join("tsconfig.json"), "{}")?;
        Ok(dir)
    }

    #[test]
    fn brace_alternatives_expand_to_each_file() -> anyhow::Result<()> {
        let dir = legacy_tree()?;

        let paths =
            resolve_possibly_globbed_paths(&entries(&["{a,b}.d.ts"]), Some(dir.path()), options())?;

        assert_eq!(
            paths,
            vec![dir.path().join("a.d.ts"), dir.path().join("b.d.ts")]
        );
        Ok(())
    }

    #[test]
    fn brace_alternatives_may_span_directories() -> anyhow::Result<()> {
        let dir = declaration_tree()?;

        let paths = resolve_possibly_globbed_paths(
            &entries(&["{index,lib/nested/b}.d.ts"]),
            Some(dir.path()),
            options(),
        )?;

        assert_eq!(
            paths,
            vec![
                dir.path().join("index.d.ts"),
                dir.path().join("lib/nested/b.d.ts")
            ]
        );
        Ok(())
    }

    #[test]
    fn negated_directory_pattern_excludes_its_files() -> anyhow::Result<()> {
        let dir = legacy_tree()?;

        let paths = resolve_possibly_globbed_paths(
            &entries(&["**/*.d.ts", "!legacy/**"]),
            Some(dir.path()),
            options(),
        )?;

        assert_eq!(
            paths,
            vec![dir.path().join("a.d.ts"), dir.path().join("b.d.ts")]
        );
        Ok(())
    }

    #[test]
    fn negation_applies_regardless_of_position() -> anyhow::Result<()> {
        let dir = legacy_tree()?;

        let paths = resolve_possibly_globbed_paths(
            &entries(&["!b.d.ts", "a.d.ts", "*.d.ts"]),
            Some(dir.path()),
            options(),
        )?;

        assert_eq!(paths, vec![dir.path().join("a.d.ts")]);
        Ok(())
    }

    #[test]
    fn negated_bare_directory_excludes_nested_files() -> anyhow::Result<()> {
        let dir = legacy_tree()?;

        let paths = resolve_possibly_globbed_paths(
            &entries(&["**/*.d.ts", "!legacy"]),
            Some(dir.path()),
            options(),
        )?;

        assert!(!paths.contains(&dir.path().join("legacy/old.d.ts")));
        assert_eq!(paths.len(), 2);
        Ok(())
    }

    #[test]
    fn invalid_glob_reports_pattern() {
        let err = resolve_possibly_globbed_paths(
            &entries(&["lib/{a,b.d.ts"]),
            Some(Path::new("/project")),
            options(),
        )
        .expect_err("unclosed brace is invalid");

        assert!(matches!(err, ResolveError::GlobPattern { pattern, .. } if pattern == "lib/{a,b.d.ts"));
    }

    #[test]
    fn hidden_directories_are_only_walked_when_named() -> anyhow::Result<()> {
        let dir = declaration_tree()?;
        fs::create_dir_all(dir.path().join(".cache"))?;
        fs::write(dir.path().join(".cache/x.d.ts"), "")?;

        let all =
            resolve_possibly_globbed_paths(&entries(&["**/*.d.ts"]), Some(dir.path()), options())?;
        let named = resolve_possibly_globbed_paths(
            &entries(&[".cache/*.d.ts"]),
            Some(dir.path()),
            options(),
        )?;

        assert!(!all.contains(&dir.path().join(".cache/x.d.ts")));
        assert_eq!(named, vec![dir.path().join(".cache/x.d.ts")]);
        Ok(())
    }

    #[test]
    fn normalizes_dot_segments() {
        assert_eq!(
            normalize_path(Path::new("/a/b/../c/./d.d.ts")),
            PathBuf::from("/a/c/d.d.ts")
        );
    }

    #[test]
    fn expands_recursive_glob_against_base() -> anyhow::Result<()> {
        let dir = declaration_tree()?;

        let paths = resolve_possibly_globbed_paths(
            &entries(&["**/*.d.ts"]),
            Some(dir.path()),
            options(),
        )?;

        assert_eq!(paths.len(), 3);
        assert!(paths.iter().all(|p| p.is_absolute()));
        assert!(paths.contains(&dir.path().join("lib/nested/b.d.ts")));
        assert!(!paths.iter().any(|p| p.ends_with("c.js")));
        Ok(())
    }

    #[test]
    fn single_star_does_not_cross_directories() -> anyhow::Result<()> {
        let dir = declaration_tree()?;

        let paths =
            resolve_possibly_globbed_paths(&entries(&["lib/*.d.ts"]), Some(dir.path()), options())?;

        assert_eq!(paths, vec![dir.path().join("lib/a.d.ts")]);
        Ok(())
    }

    #[test]
    fn deduplicates_preserving_first_occurrence() -> anyhow::Result<()> {
        let dir = declaration_tree()?;

        let paths = resolve_possibly_globbed_paths(
            &entries(&["lib/a.d.ts", "index.d.ts", "./lib/a.d.ts", "lib/*.d.ts"]),
            Some(dir.path()),
            options(),
        )?;

        assert_eq!(
            paths,
            vec![dir.path().join("lib/a.d.ts"), dir.path().join("index.d.ts")]
        );
        Ok(())
    }

    #[test]
    fn missing_explicit_file_fails() -> anyhow::Result<()> {
        let dir = declaration_tree()?;

        let err = resolve_possibly_globbed_paths(
            &entries(&["missing.d.ts"]),
            Some(dir.path()),
            options(),
        )
        .expect_err("missing file should fail");

        assert!(matches!(err, ResolveError::FileNotFound { path } if path == dir.path().join("missing.d.ts")));
        Ok(())
    }

    #[test]
    fn missing_explicit_file_tolerated_when_requested() -> anyhow::Result<()> {
        let dir = declaration_tree()?;

        let paths = resolve_possibly_globbed_paths(
            &entries(&["missing.d.ts", "index.d.ts"]),
            Some(dir.path()),
            GlobbedPathsOptions {
                ignore_missing_files: true,
                ..options()
            },
        )?;

        assert_eq!(paths, vec![dir.path().join("index.d.ts")]);
        Ok(())
    }

    #[test]
    fn glob_without_base_fails() {
        let err = resolve_possibly_globbed_paths(&entries(&["**/*.d.ts"]), None, options())
            .expect_err("glob needs a base");

        assert!(matches!(err, ResolveError::GlobWithoutBase));
    }

    #[test]
    fn relative_entry_without_base_is_invalid() {
        let err = resolve_possibly_globbed_paths(&entries(&["index.d.ts"]), None, options())
            .expect_err("relative path needs a base");

        assert!(matches!(err, ResolveError::InvalidPath { entry } if entry == "index.d.ts"));
    }

    #[test]
    fn relative_entry_passes_through_when_allowed() -> anyhow::Result<()> {
        let paths = resolve_possibly_globbed_paths(
            &entries(&["index.d.ts", "other.d.ts"]),
            None,
            GlobbedPathsOptions {
                allow_relative: true,
                ..options()
            },
        )?;

        assert_eq!(paths, vec![PathBuf::from("index.d.ts")]);
        Ok(())
    }

    #[test]
    fn absolute_entry_resolves_without_base() -> anyhow::Result<()> {
        let dir = declaration_tree()?;
        let absolute = dir.path().join("index.d.ts");

        let paths = resolve_possibly_globbed_paths(
            &[absolute.to_string_lossy().into_owned()],
            None,
            options(),
        )?;

        assert_eq!(paths, vec![absolute]);
        Ok(())
    }
}
