//! Marks external imports of TypeScript declaration files with `// @ts-ignore`.

mod anchor;
mod error;
mod imports;
mod source;
mod suppress;

pub use anchor::{
    Anchor, Enclosing, enclosing_statement, first_node_starting_on_same_line, is_suppressed,
    leading_comments, marker_insertion,
};
pub use error::SuppressError;
pub use imports::{ImportLiteral, ReferenceForm, import_literals};
pub use source::{Insertion, SourceFile, Token, TokenKind};
pub use suppress::{SuppressPass, suppress_external_imports};

pub type Result<T> = std::result::Result<T, SuppressError>;
