use std::path::{Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::error::ResolveError;

/// Gitignore-style patterns that remove declaration files from a run.
#[derive(Debug)]
pub struct SkipRules {
    matcher: Gitignore,
    pattern_count: usize,
}

impl SkipRules {
    /// Builds the matcher rooted at `root`. Returns `None` for an empty pattern
    /// list so that no matcher (and none of its defaults) is ever consulted.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::SkipPattern` if a pattern is not valid gitignore syntax.
    pub fn build(root: &Path, patterns: &[String]) -> Result<Option<Self>, ResolveError> {
        if patterns.is_empty() {
            return Ok(None);
        }

        let mut builder = GitignoreBuilder::new(root);
        for pattern in patterns {
            builder
                .add_line(None, pattern)
                .map_err(|source| ResolveError::SkipPattern {
                    pattern: pattern.clone(),
                    source,
                })?;
        }
        let matcher = builder.build().map_err(|source| ResolveError::SkipPattern {
            pattern: patterns.join(", "),
            source,
        })?;

        Ok(Some(Self {
            matcher,
            pattern_count: patterns.len(),
        }))
    }

    #[must_use]
    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    /// Whether `file` (absolute) is skipped. Files outside the matcher root are
    /// never skipped.
    ///
    /// Directories are checked from the top down before the file itself, so a
    /// file below a skipped directory cannot be re-included by a negated pattern.
    #[must_use]
    pub fn is_skipped(&self, file: &Path) -> bool {
        let Ok(relative) = file.strip_prefix(self.matcher.path()) else {
            return false;
        };

        let mut dir = PathBuf::new();
        let mut components = relative.components().peekable();
        while let Some(component) = components.next() {
            if components.peek().is_none() {
                break;
            }
            dir.push(component);
            if self.matcher.matched(&dir, true).is_ignore() {
                return true;
            }
        }

        self.matcher.matched(relative, false).is_ignore()
    }

    #[must_use]
    pub fn filter(&self, files: Vec<PathBuf>) -> Vec<PathBuf> {
        files
            .into_iter()
            .filter(|file| !self.is_skipped(file))
            .collect()
    }
}

/// Deepest directory that contains both `a` and `b`.
#[must_use]
pub fn shared_top_path(a: &Path, b: &Path) -> PathBuf {
    a.components()
        .zip(b.components())
        .take_while(|(left, right)| left == right)
        .map(|(component, _)| component)
        .collect()
}
