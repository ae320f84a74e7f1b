//! Constants and definitions for the Newick dialect.
//!
//! The generic lexer is format-agnostic; everything Newick-specific about
//! tokenization is concentrated in [newick_char_table()]. Default node
//! names used by parser and writer options live here as well.

use crate::lexer::{CharTable, TokenKind};

/// Name given to unnamed leaf nodes when default naming is enabled.
pub const DEFAULT_LEAF_NAME: &str = "Leaf Node";

/// Name given to unnamed internal nodes when default naming is enabled.
pub const DEFAULT_INTERNAL_NAME: &str = "Internal Node";

/// Name given to an unnamed root node when default naming is enabled.
pub const DEFAULT_ROOT_NAME: &str = "Root Node";

/// Returns the [CharTable] for the Newick format.
///
/// On top of the [base table](CharTable::base) this claims:
/// * `(` and `)` as brackets delimiting subtrees
/// * `,` and `;` as operators separating siblings and closing trees
/// * `:` as the lead-in of a branch length number
/// * `'` and `"` as quoted name delimiters
/// * `[` as the opener of a comment (closed by `]`)
/// * `{` as the opener of a tag (closed by `}`)
///
/// # Example
/// ```
/// use phylink::lexer::TokenKind;
/// use phylink::newick::newick_char_table;
///
/// let table = newick_char_table();
/// assert_eq!(table.kind_of(b'('), TokenKind::BracketOpen);
/// assert_eq!(table.kind_of(b':'), TokenKind::Number);
/// assert_eq!(table.kind_of(b'K'), TokenKind::Symbol);
/// ```
pub fn newick_char_table() -> CharTable {
    let mut table = CharTable::base();
    table.set(TokenKind::BracketOpen, "(");
    table.set(TokenKind::BracketClose, ")");
    table.set(TokenKind::Operator, ",;");
    table.set(TokenKind::Number, ":");
    table.set(TokenKind::QuotedString, "'\"");
    table.set(TokenKind::Comment, "[");
    table.set(TokenKind::Tag, "{");
    table
}
