//! Locating the syntax a suppression comment attaches to.

use tree_sitter::Node;
use tsignore_core::SUPPRESSION_MARKER;

use crate::imports::{ImportLiteral, ReferenceForm};
use crate::source::{Insertion, SourceFile, Token, TokenKind};

/// What encloses an import literal for the purpose of suppressing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enclosing {
    /// A whole statement, starting at the given token index.
    Statement { token: usize },
    /// An inline `import('x')` that does not start its statement; the token
    /// index of its `import` keyword.
    ImportType { token: usize },
}

impl Enclosing {
    #[must_use]
    pub fn token(self) -> usize {
        match self {
            Self::Statement { token } | Self::ImportType { token } => token,
        }
    }
}

/// Token a suppression comment is placed in front of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub token: usize,
    pub offset: usize,
}

fn is_statement_container(kind: &str) -> bool {
    matches!(kind, "program" | "statement_block")
}

fn statement_node<'tree>(mut node: Node<'tree>) -> Node<'tree> {
    while let Some(parent) = node.parent() {
        if is_statement_container(parent.kind()) {
            break;
        }
        node = parent;
    }
    node
}

fn token_at_or_after(tokens: &[Token<'_>], offset: usize) -> Option<usize> {
    tokens.iter().position(|token| token.start >= offset)
}

/// Walks up from the literal to its statement, stopping at an inline
/// `import('x')` wrapper when that wrapper is not the statement itself.
#[must_use]
pub fn enclosing_statement(tokens: &[Token<'_>], literal: &ImportLiteral) -> Enclosing {
    let statement = statement_node(tokens[literal.token].node);
    let statement_start = statement.start_byte();

    if let ReferenceForm::ImportCall { keyword } = literal.form {
        if tokens[keyword].start != statement_start {
            return Enclosing::ImportType { token: keyword };
        }
    }

    let token = token_at_or_after(tokens, statement_start)
        .filter(|&idx| idx <= literal.token)
        .unwrap_or(literal.token);
    Enclosing::Statement { token }
}

/// Statements move to the first token that starts on their line, so every
/// statement packed onto one line shares a single anchor. Import type wrappers
/// keep their own position.
#[must_use]
pub fn first_node_starting_on_same_line(
    file: &SourceFile,
    tokens: &[Token<'_>],
    enclosing: Enclosing,
) -> Anchor {
    let own = Anchor {
        token: enclosing.token(),
        offset: tokens[enclosing.token()].start,
    };
    if let Enclosing::ImportType { .. } = enclosing {
        return own;
    }

    let line_start = file.line_start(own.offset);
    match token_at_or_after(tokens, line_start) {
        Some(first)
            if tokens[first].start <= own.offset
                && is_blank(file.slice(line_start, tokens[first].start)) =>
        {
            Anchor {
                token: first,
                offset: tokens[first].start,
            }
        }
        _ => own,
    }
}

/// Comments between the previous code token and the anchor, closest last.
///
/// Comments that start on the line where the previous code ends trail that
/// code and are not included.
pub fn leading_comments<'a, 'tree>(
    file: &'a SourceFile,
    tokens: &'a [Token<'tree>],
    anchor: Anchor,
) -> impl Iterator<Item = &'a Token<'tree>> {
    let previous_code = tokens[..anchor.token]
        .iter()
        .rposition(|token| token.kind != TokenKind::Comment);
    let first_comment = previous_code.map_or(0, |idx| idx + 1);

    let mut gap_start = previous_code.map(|idx| tokens[idx].end);
    tokens[first_comment..anchor.token]
        .iter()
        .skip_while(move |comment| match gap_start {
            Some(start) if !file.slice(start, comment.start).contains('\n') => {
                gap_start = Some(comment.end);
                true
            }
            _ => false,
        })
}

/// Whether a suppression marker already precedes the anchor.
#[must_use]
pub fn is_suppressed(file: &SourceFile, tokens: &[Token<'_>], anchor: Anchor) -> bool {
    leading_comments(file, tokens, anchor)
        .any(|comment| file.slice(comment.start, comment.end).trim_end() == SUPPRESSION_MARKER)
}

/// Marker line for the anchor: a full line above it when the anchor is the first
/// thing on its line, otherwise a line break in front of it.
#[must_use]
pub fn marker_insertion(file: &SourceFile, anchor: Anchor) -> Insertion {
    let line_start = file.line_start(anchor.offset);
    let prefix = file.slice(line_start, anchor.offset);
    let eol = file.line_ending();

    if is_blank(prefix) {
        Insertion {
            offset: line_start,
            text: format!("{prefix}{SUPPRESSION_MARKER}{eol}"),
        }
    } else {
        Insertion {
            offset: anchor.offset,
            text: format!("{eol}{SUPPRESSION_MARKER}{eol}"),
        }
    }
}

fn is_blank(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}
