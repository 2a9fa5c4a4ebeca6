//! Parsed declaration file with a flat token view over its syntax tree.

use std::path::{Path, PathBuf};

use tracing::debug;
use tree_sitter::{Node, Parser, Tree};

use crate::error::SuppressError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Comment,
    StringLiteral,
    Other,
}

/// A leaf of the syntax tree, in document order.
///
/// Strings, template strings and comments are kept whole rather than split into
/// their inner fragments.
#[derive(Debug, Clone, Copy)]
pub struct Token<'tree> {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
    pub node: Node<'tree>,
}

/// Text inserted at a byte offset of a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    pub offset: usize,
    pub text: String,
}

/// One declaration file held in memory together with its syntax tree.
pub struct SourceFile {
    path: PathBuf,
    text: String,
    tree: Tree,
    modified: bool,
}

impl std::fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("path", &self.path)
            .field("len", &self.text.len())
            .field("modified", &self.modified)
            .finish_non_exhaustive()
    }
}

impl SourceFile {
    /// # Errors
    ///
    /// Returns `SuppressError` if the grammar cannot be loaded or the parser gives
    /// up on the text. Syntax errors inside the text are tolerated.
    pub fn parse(path: impl Into<PathBuf>, text: impl Into<String>) -> Result<Self, SuppressError> {
        let path = path.into();
        let text = text.into();
        let tree = parse_tree(&path, &text)?;
        Ok(Self {
            path,
            text,
            tree,
            modified: false,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Whether any insertion was applied since the file was parsed.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> &str {
        &self.text[start..end]
    }

    #[must_use]
    pub fn tokens(&self) -> Vec<Token<'_>> {
        collect_tokens(&self.tree, &self.text)
    }

    /// Byte offset at which the line holding `offset` begins.
    #[must_use]
    pub fn line_start(&self, offset: usize) -> usize {
        self.text[..offset].rfind('\n').map_or(0, |idx| idx + 1)
    }

    /// Line break used by the file, so inserted lines match their surroundings.
    #[must_use]
    pub fn line_ending(&self) -> &'static str {
        if self.text.contains("\r\n") { "\r\n" } else { "\n" }
    }

    /// Applies all insertions, last offset first so earlier offsets stay valid,
    /// then re-parses the file. Duplicate offsets are applied once.
    ///
    /// # Errors
    ///
    /// Returns `SuppressError::InvalidInsertion` if an offset is not a character
    /// boundary of the current text, leaving the file untouched.
    pub fn apply(&mut self, mut insertions: Vec<Insertion>) -> Result<usize, SuppressError> {
        insertions.sort_by(|a, b| b.offset.cmp(&a.offset));
        insertions.dedup_by_key(|insertion| insertion.offset);

        if let Some(bad) = insertions
            .iter()
            .find(|insertion| !self.text.is_char_boundary(insertion.offset))
        {
            return Err(SuppressError::InvalidInsertion {
                path: self.path.clone(),
                offset: bad.offset,
                len: self.text.len(),
            });
        }
        if insertions.is_empty() {
            return Ok(0);
        }

        for insertion in &insertions {
            self.text.insert_str(insertion.offset, &insertion.text);
        }
        self.tree = parse_tree(&self.path, &self.text)?;
        self.modified = true;

        Ok(insertions.len())
    }
}

fn parse_tree(path: &Path, text: &str) -> Result<Tree, SuppressError> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())?;

    let tree = parser
        .parse(text, None)
        .ok_or_else(|| SuppressError::Parse {
            path: path.to_path_buf(),
        })?;

    if tree.root_node().has_error() {
        debug!(path = %path.display(), "declaration file contains syntax errors");
    }

    Ok(tree)
}

fn is_whole_token(kind: &str) -> bool {
    matches!(kind, "string" | "template_string" | "comment" | "regex")
}

fn is_quote(kind: &str) -> bool {
    matches!(kind, "'" | "\"")
}

fn collect_tokens<'tree>(tree: &'tree Tree, text: &str) -> Vec<Token<'tree>> {
    let mut tokens = Vec::new();
    let mut cursor = tree.walk();
    // Error recovery can leave a string as loose quote and fragment leaves.
    let mut open_quote: Option<(Node<'tree>, &str)> = None;

    loop {
        let node = cursor.node();
        let whole = is_whole_token(node.kind());

        if whole || !cursor.goto_first_child() {
            if node.start_byte() < node.end_byte() && !node.is_missing() {
                let leaf = &text[node.start_byte()..node.end_byte()];
                match open_quote {
                    Some((opening, quote)) if leaf == quote => {
                        tokens.push(Token {
                            kind: TokenKind::StringLiteral,
                            start: opening.start_byte(),
                            end: node.end_byte(),
                            node: opening,
                        });
                        open_quote = None;
                    }
                    Some(_) => {}
                    None if !whole && is_quote(node.kind()) => {
                        open_quote = Some((node, leaf));
                    }
                    None => tokens.push(Token {
                        kind: match node.kind() {
                            "comment" => TokenKind::Comment,
                            "string" => TokenKind::StringLiteral,
                            _ => TokenKind::Other,
                        },
                        start: node.start_byte(),
                        end: node.end_byte(),
                        node,
                    }),
                }
            }

            while !cursor.goto_next_sibling() {
                if !cursor.goto_parent() {
                    return tokens;
                }
            }
        }
    }
}
