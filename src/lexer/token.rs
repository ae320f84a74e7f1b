//! Provides [Token] and [TokenKind], the units the tokenizer hands to the
//! grammar parser.

/// Classification of a [Token], and of the byte that starts it.
///
/// The same enum plays both roles: a [CharTable](crate::lexer::CharTable)
/// maps a leading byte to the kind whose scan routine should run, and the
/// finished token carries the kind the parser matches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Opening group delimiter, `(`.
    BracketOpen,
    /// Closing group delimiter, `)`.
    BracketClose,
    /// Single-character operator; for Newick these are `,` and `;`.
    Operator,
    /// Unquoted label run.
    Symbol,
    /// Quoted label; token text is the decoded content without quotes.
    QuotedString,
    /// Numeric literal; token text excludes a leading `:` prefix.
    Number,
    /// `{...}` block; token text excludes the braces.
    Tag,
    /// `[...]` block; token text excludes the brackets.
    Comment,
    /// Run of whitespace; only emitted when the lexer is configured to.
    Whitespace,
    /// Unrecoverable lexical problem; the lexer stops after emitting one.
    Error,
}

/// A single classified token with its source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    text: String,
    line: usize,
    column: usize,
}

impl Token {
    pub(crate) fn new(kind: TokenKind, text: String, line: usize, column: usize) -> Self {
        Token {
            kind,
            text,
            line,
            column,
        }
    }

    /// The classified kind of this token.
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The literal text, with delimiters/escapes already stripped for
    /// quoted strings, comments and tags.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// 1-based line of the first character of this token.
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based column of the first character of this token.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Checks whether this token is the operator with the given text.
    pub fn is_operator(&self, text: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == text
    }

    /// Checks whether this token names a node, i.e. is a symbol or a
    /// quoted string.
    pub fn is_name(&self) -> bool {
        matches!(self.kind, TokenKind::Symbol | TokenKind::QuotedString)
    }

    pub fn is_comment(&self) -> bool {
        self.kind == TokenKind::Comment
    }

    pub fn is_error(&self) -> bool {
        self.kind == TokenKind::Error
    }
}
