use indexmap::IndexSet;
use tracing::debug;
use tsignore_core::{IgnoreSet, is_allowed, is_relative, strip_quotes};

use crate::anchor::{
    enclosing_statement, first_node_starting_on_same_line, is_suppressed, marker_insertion,
};
use crate::error::SuppressError;
use crate::imports::import_literals;
use crate::source::SourceFile;

/// Outcome of a single suppression pass over one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuppressPass {
    /// Bare module names that received a new marker, in document order.
    pub newly_suppressed: Vec<String>,
    /// Bare module names whose marker was already present.
    pub already_suppressed: Vec<String>,
    /// Number of marker lines written in this pass.
    pub insertions: usize,
}

impl SuppressPass {
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.insertions == 0
    }
}

/// Puts a `// @ts-ignore` line in front of every statement importing a module
/// that is neither relative nor allowed.
///
/// Every external module seen, marked now or earlier, is recorded in
/// `ignore_set` by its bare name. Markers are collected over the whole file and
/// written in one batch, so a caller keeps calling until the pass reports no
/// insertions.
///
/// # Errors
///
/// Returns `SuppressError` if an insertion cannot be applied or the modified
/// text cannot be parsed again.
pub fn suppress_external_imports(
    file: &mut SourceFile,
    allowed_dependencies: &[String],
    ignore_set: &mut IgnoreSet,
) -> Result<SuppressPass, SuppressError> {
    let mut pass = SuppressPass::default();
    let mut insertions = Vec::new();
    let mut anchored = IndexSet::new();

    {
        let tokens = file.tokens();
        for literal in import_literals(file, &tokens) {
            if is_relative(&literal.specifier)
                || is_allowed(&literal.specifier, allowed_dependencies)
            {
                continue;
            }

            let name = strip_quotes(&literal.specifier).to_string();
            ignore_set.insert(name.clone());

            let enclosing = enclosing_statement(&tokens, &literal);
            let anchor = first_node_starting_on_same_line(file, &tokens, enclosing);

            if is_suppressed(file, &tokens, anchor) {
                debug!(
                    path = %file.path().display(),
                    module = %name,
                    "import already suppressed"
                );
                pass.already_suppressed.push(name);
                continue;
            }

            if anchored.insert(anchor.offset) {
                insertions.push(marker_insertion(file, anchor));
            }
            pass.newly_suppressed.push(name);
        }
    }

    pass.insertions = file.apply(insertions)?;
    debug!(
        path = %file.path().display(),
        insertions = pass.insertions,
        "suppression pass finished"
    );
    Ok(pass)
}
