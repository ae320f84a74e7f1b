//! Provides [CharTable], the per-byte dispatch table that drives the
//! tokenizer.
//!
//! Format specifics live in the table, not in lexer code: the generic
//! [Lexer](crate::lexer::Lexer) asks the table what kind of token a byte
//! starts and runs the matching scan routine. A format defines itself by
//! starting from [CharTable::base()] and overriding the bytes it cares
//! about, see [newick_char_table](crate::newick::newick_char_table).

use crate::lexer::TokenKind;

// =$========================================================================$=
// CHAR TABLE
// =$========================================================================$=
/// Maps each ASCII byte to the [TokenKind] whose scan routine handles it.
///
/// Non-ASCII bytes are not listed; the lexer treats them as part of the
/// surrounding quoted string or comment, and as an error elsewhere.
///
/// # Example
/// ```
/// use phylink::lexer::{CharTable, TokenKind};
///
/// let mut table = CharTable::base();
/// table.set(TokenKind::Operator, ",;");
/// assert_eq!(table.kind_of(b','), TokenKind::Operator);
/// assert_eq!(table.kind_of(b'k'), TokenKind::Symbol);
/// ```
#[derive(Debug, Clone)]
pub struct CharTable {
    kinds: [TokenKind; 128],
}

// ============================================================================
// New, Setters / Accessors
// ============================================================================
impl CharTable {
    /// Creates the format-independent base table.
    ///
    /// Letters and `_` start symbols, digits and `+`, `-`, `.` start
    /// numbers, and whitespace starts a whitespace run. Every other byte
    /// is an error until a format claims it with [CharTable::set()].
    pub fn base() -> Self {
        let mut kinds = [TokenKind::Error; 128];
        for byte in 0u8..128 {
            if byte.is_ascii_alphabetic() || byte == b'_' {
                kinds[byte as usize] = TokenKind::Symbol;
            } else if byte.is_ascii_digit() || matches!(byte, b'+' | b'-' | b'.') {
                kinds[byte as usize] = TokenKind::Number;
            } else if byte.is_ascii_whitespace() {
                kinds[byte as usize] = TokenKind::Whitespace;
            }
        }
        CharTable { kinds }
    }

    /// Assigns `kind` to every byte in `chars`.
    ///
    /// # Panics
    /// Panics if `chars` contains a non-ASCII character.
    pub fn set(&mut self, kind: TokenKind, chars: &str) {
        for ch in chars.chars() {
            assert!(ch.is_ascii(), "char table only covers ASCII");
            self.kinds[ch as usize] = kind;
        }
    }

    /// Looks up the token kind that `byte` starts.
    pub fn kind_of(&self, byte: u8) -> TokenKind {
        if byte < 128 {
            self.kinds[byte as usize]
        } else {
            TokenKind::Error
        }
    }
}
