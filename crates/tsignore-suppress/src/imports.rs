use crate::source::{SourceFile, Token, TokenKind};

/// How a module specifier is referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceForm {
    /// `import … from 'x'`, `export … from 'x'` or `import 'x'`.
    Declaration,
    /// `require('x')`, including `import x = require('x')`.
    Require,
    /// `import('x')`, either an import type or a dynamic import. Holds the token
    /// index of the `import` keyword.
    ImportCall { keyword: usize },
}

/// A string literal naming the target of an import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportLiteral {
    /// Literal text including its quotes.
    pub specifier: String,
    /// Index of the literal in [`SourceFile::tokens`].
    pub token: usize,
    pub form: ReferenceForm,
}

/// Every import/require string literal of the file, in document order.
///
/// `declare module 'x'` names and triple-slash references are not imports.
#[must_use]
pub fn import_literals(file: &SourceFile, tokens: &[Token<'_>]) -> Vec<ImportLiteral> {
    let code: Vec<usize> = (0..tokens.len())
        .filter(|&idx| tokens[idx].kind != TokenKind::Comment)
        .collect();
    let text_of = |idx: usize| file.slice(tokens[idx].start, tokens[idx].end);

    let mut literals = Vec::new();
    for (pos, &idx) in code.iter().enumerate() {
        if tokens[idx].kind != TokenKind::StringLiteral {
            continue;
        }
        let before = pos.checked_sub(1).map(|p| code[p]);
        let callee = pos.checked_sub(2).map(|p| code[p]);

        let form = match (before.map(text_of), callee.map(|c| (c, text_of(c)))) {
            (Some("from"), _) => ReferenceForm::Declaration,
            (Some("import"), _) if tokens[idx].node.parent().is_some_and(is_import_parent) => {
                ReferenceForm::Declaration
            }
            (Some("("), Some((_, "require"))) => ReferenceForm::Require,
            (Some("("), Some((keyword, "import"))) => ReferenceForm::ImportCall { keyword },
            _ => continue,
        };

        literals.push(ImportLiteral {
            specifier: text_of(idx).to_string(),
            token: idx,
            form,
        });
    }
    literals
}

fn is_import_parent(node: tree_sitter::Node<'_>) -> bool {
    node.kind() == "import_statement" || node.is_error()
}
