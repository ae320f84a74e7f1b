//! Table-driven tokenizer splitting text into [Token]s.
//!
//! The lexer knows nothing about any concrete format. All format knowledge
//! sits in a [CharTable] mapping each byte to the [TokenKind] it starts;
//! the lexer runs the scan routine for that kind. The Newick table lives in
//! [newick_char_table](crate::newick::newick_char_table).
//!
//! # Token shapes
//! | Kind | Scanned as |
//! |------|------------|
//! | [TokenKind::Symbol] | run of alphanumeric characters and `_` `.` `-` `+` |
//! | [TokenKind::Number] | `[+-]? digits [. digits] [e/E [+-] digits]`; a leading `:` is skipped |
//! | [TokenKind::QuotedString] | up to the matching quote; a doubled quote decodes to one |
//! | [TokenKind::Comment] | up to `]`, brackets stripped |
//! | [TokenKind::Tag] | up to `}`, braces stripped |
//! | [TokenKind::Whitespace] | run of whitespace |
//! | others | the single starting character |
//!
//! Number text is guaranteed to parse as `f64`; a malformed literal becomes
//! a [TokenKind::Error] token instead. On any error token the lexer stops,
//! so an error is always the last token of the output.

pub mod char_table;
pub mod token;

pub use char_table::CharTable;
pub use token::Token;
pub use token::TokenKind;

// =$========================================================================$=
// LEXER
// =$========================================================================$=
/// Tokenizer over a [CharTable], with a few knobs for what to emit.
///
/// By default whitespace tokens are dropped, comment tokens are kept, and
/// a sign directly in front of a numeric literal is glued into the number
/// token.
///
/// # Example
/// ```
/// use phylink::lexer::{Lexer, TokenKind};
/// use phylink::newick::newick_char_table;
///
/// let lexer = Lexer::new(newick_char_table());
/// let tokens = lexer.tokenize("(Kea:4.2,Kaka)Nestor;");
/// assert_eq!(tokens[0].kind(), TokenKind::BracketOpen);
/// assert_eq!(tokens[1].text(), "Kea");
/// assert_eq!(tokens[2].text(), "4.2");
/// ```
#[derive(Debug, Clone)]
pub struct Lexer {
    table: CharTable,
    include_whitespace: bool,
    include_comments: bool,
    glue_sign_to_number: bool,
}

// ============================================================================
// New, Builder-style setters
// ============================================================================
impl Lexer {
    /// Creates a lexer that dispatches on the given table.
    pub fn new(table: CharTable) -> Self {
        Lexer {
            table,
            include_whitespace: false,
            include_comments: true,
            glue_sign_to_number: true,
        }
    }

    /// Sets whether whitespace runs are emitted as tokens. Default `false`.
    pub fn with_whitespace(mut self, include: bool) -> Self {
        self.include_whitespace = include;
        self
    }

    /// Sets whether comment blocks are emitted as tokens. Default `true`.
    pub fn with_comments(mut self, include: bool) -> Self {
        self.include_comments = include;
        self
    }

    /// Sets whether a sign directly in front of a numeric literal becomes
    /// part of the number token, as opposed to a one-character operator.
    /// Default `true`.
    pub fn with_glued_sign(mut self, glue: bool) -> Self {
        self.glue_sign_to_number = glue;
        self
    }

    /// The dispatch table this lexer runs on.
    pub fn table(&self) -> &CharTable {
        &self.table
    }
}

// ============================================================================
// Tokenizing
// ============================================================================
impl Lexer {
    /// Splits `text` into tokens.
    ///
    /// Stops at the first lexical problem, in which case the last token of
    /// the result is a [TokenKind::Error] token whose text describes the
    /// problem and whose position points at it.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut scan = Scan::new(text);
        let mut tokens = Vec::new();
        while !scan.at_end() {
            let line = scan.line;
            let column = scan.column;
            let kind = self.table.kind_of(scan.peek());
            let token = match kind {
                TokenKind::Whitespace => self.scan_whitespace(text, &mut scan, line, column),
                TokenKind::Comment => {
                    self.scan_enclosed(text, &mut scan, b']', TokenKind::Comment, line, column)
                }
                TokenKind::Tag => {
                    self.scan_enclosed(text, &mut scan, b'}', TokenKind::Tag, line, column)
                }
                TokenKind::QuotedString => self.scan_quoted(text, &mut scan, line, column),
                TokenKind::Number => self.scan_number(text, &mut scan, line, column),
                TokenKind::Symbol => self.scan_symbol(text, &mut scan, line, column),
                TokenKind::BracketOpen | TokenKind::BracketClose | TokenKind::Operator => {
                    let byte = scan.bump();
                    Token::new(kind, (byte as char).to_string(), line, column)
                }
                TokenKind::Error => {
                    let byte = scan.bump();
                    let msg = if byte.is_ascii_graphic() {
                        format!("invalid character '{}'", byte as char)
                    } else {
                        format!("invalid character 0x{byte:02x}")
                    };
                    Token::new(TokenKind::Error, msg, line, column)
                }
            };
            let stop = token.is_error();
            let keep = match token.kind() {
                TokenKind::Whitespace => self.include_whitespace,
                TokenKind::Comment => self.include_comments,
                _ => true,
            };
            if keep {
                tokens.push(token);
            }
            if stop {
                break;
            }
        }
        tokens
    }

    fn scan_whitespace(&self, text: &str, scan: &mut Scan, line: usize, column: usize) -> Token {
        let start = scan.pos;
        while !scan.at_end() && self.table.kind_of(scan.peek()) == TokenKind::Whitespace {
            scan.bump();
        }
        Token::new(
            TokenKind::Whitespace,
            text[start..scan.pos].to_string(),
            line,
            column,
        )
    }

    /// Scans a delimited block (comment or tag); delimiters are stripped
    /// from the token text.
    fn scan_enclosed(
        &self,
        text: &str,
        scan: &mut Scan,
        closer: u8,
        kind: TokenKind,
        line: usize,
        column: usize,
    ) -> Token {
        scan.bump();
        let start = scan.pos;
        while !scan.at_end() && scan.peek() != closer {
            scan.bump();
        }
        if scan.at_end() {
            let what = if kind == TokenKind::Comment {
                "comment"
            } else {
                "tag"
            };
            return Token::new(TokenKind::Error, format!("unterminated {what}"), line, column);
        }
        let value = text[start..scan.pos].to_string();
        scan.bump();
        Token::new(kind, value, line, column)
    }

    /// Scans a quoted string. The closing character is the opening one;
    /// doubling it inside the string escapes it.
    fn scan_quoted(&self, text: &str, scan: &mut Scan, line: usize, column: usize) -> Token {
        let quote = scan.bump();
        let mut value = String::new();
        let mut seg_start = scan.pos;
        loop {
            if scan.at_end() {
                return Token::new(
                    TokenKind::Error,
                    "unterminated quoted string".to_string(),
                    line,
                    column,
                );
            }
            if scan.peek() == quote {
                value.push_str(&text[seg_start..scan.pos]);
                scan.bump();
                if !scan.at_end() && scan.peek() == quote {
                    seg_start = scan.pos;
                    scan.bump();
                } else {
                    break;
                }
            } else {
                scan.bump();
            }
        }
        Token::new(TokenKind::QuotedString, value, line, column)
    }

    /// Scans a numeric literal: optional sign, digits with an optional
    /// fractional part, and an exponent that is only consumed when a digit
    /// actually follows it. A leading `:` is skipped so that formats may
    /// route `:` here to mean "a number comes next".
    fn scan_number(&self, text: &str, scan: &mut Scan, line: usize, column: usize) -> Token {
        if scan.peek() == b':' {
            scan.bump();
        }
        if !self.glue_sign_to_number
            && !scan.at_end()
            && matches!(scan.peek(), b'+' | b'-')
        {
            let byte = scan.bump();
            return Token::new(TokenKind::Operator, (byte as char).to_string(), line, column);
        }
        let start = scan.pos;
        if !scan.at_end() && matches!(scan.peek(), b'+' | b'-') {
            scan.bump();
        }
        let mut digits = 0;
        while !scan.at_end() && scan.peek().is_ascii_digit() {
            scan.bump();
            digits += 1;
        }
        if !scan.at_end() && scan.peek() == b'.' {
            scan.bump();
            while !scan.at_end() && scan.peek().is_ascii_digit() {
                scan.bump();
                digits += 1;
            }
        }
        if digits == 0 {
            return Token::new(
                TokenKind::Error,
                "invalid numerical literal".to_string(),
                line,
                column,
            );
        }
        if !scan.at_end() && matches!(scan.peek(), b'e' | b'E') {
            let mut ahead = 1;
            if matches!(scan.peek_ahead(ahead), Some(b'+') | Some(b'-')) {
                ahead += 1;
            }
            if scan.peek_ahead(ahead).is_some_and(|b| b.is_ascii_digit()) {
                scan.bump();
                if matches!(scan.peek(), b'+' | b'-') {
                    scan.bump();
                }
                while !scan.at_end() && scan.peek().is_ascii_digit() {
                    scan.bump();
                }
            }
        }
        Token::new(TokenKind::Number, text[start..scan.pos].to_string(), line, column)
    }

    fn scan_symbol(&self, text: &str, scan: &mut Scan, line: usize, column: usize) -> Token {
        let start = scan.pos;
        while !scan.at_end() && is_symbol_byte(scan.peek()) {
            scan.bump();
        }
        Token::new(TokenKind::Symbol, text[start..scan.pos].to_string(), line, column)
    }
}

fn is_symbol_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b'.' | b'-' | b'+')
}

// =$========================================================================$=
// SCAN CURSOR
// =$========================================================================$=
/// Byte cursor over the input, tracking 1-based line and column.
/// A `\r\n` pair counts as a single line break.
struct Scan<'a> {
    bytes: &'a [u8],
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Scan<'a> {
    fn new(text: &'a str) -> Self {
        Scan {
            bytes: text.as_bytes(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> u8 {
        self.bytes[self.pos]
    }

    fn peek_ahead(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> u8 {
        let byte = self.bytes[self.pos];
        self.pos += 1;
        match byte {
            b'\n' => {
                self.line += 1;
                self.column = 1;
            }
            b'\r' if self.bytes.get(self.pos) != Some(&b'\n') => {
                self.line += 1;
                self.column = 1;
            }
            _ => self.column += 1,
        }
        byte
    }
}
