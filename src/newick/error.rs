//! Error type for Newick parsing.
//!
//! Every failure mode of the text-to-tree pipeline is a [ParseError]
//! variant. Positions are 1-based line and column numbers of the byte
//! that triggered the error.

use thiserror::Error;

// =$========================================================================$=
// PARSE ERROR
// =$========================================================================$=
/// Error raised while turning Newick text into a tree.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The tokenizer rejected the input, for example an invalid character
    /// or an unterminated quote, comment or tag.
    #[error("line {line}, column {column}: {message}")]
    Lexing {
        message: String,
        line: usize,
        column: usize,
    },

    /// The token stream violates the Newick grammar.
    #[error("line {line}, column {column}: {message}")]
    Grammar {
        message: String,
        line: usize,
        column: usize,
    },

    /// The input ended inside an unfinished tree.
    #[error("line {line}, column {column}: unexpected end of input inside an unfinished tree")]
    UnexpectedEnd { line: usize, column: usize },

    /// More than whitespace and comments follows the first complete tree.
    #[error("line {line}, column {column}: trailing content after the closing semicolon")]
    TrailingContent { line: usize, column: usize },

    /// A branch length did not form a readable number.
    #[error("line {line}, column {column}: invalid branch length '{text}'")]
    InvalidNumber {
        text: String,
        line: usize,
        column: usize,
    },

    /// Reading the underlying file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Returns the position where the error occurred as
    /// `(line, column)`, if the variant carries one.
    ///
    /// I/O errors have no position.
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            ParseError::Lexing { line, column, .. }
            | ParseError::Grammar { line, column, .. }
            | ParseError::UnexpectedEnd { line, column }
            | ParseError::TrailingContent { line, column }
            | ParseError::InvalidNumber { line, column, .. } => Some((*line, *column)),
            ParseError::Io(_) => None,
        }
    }
}
