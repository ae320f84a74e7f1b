//! Token-to-element parsing for the Newick grammar.
//!
//! [parse_elements] turns the tokens of one tree into an [ElementList];
//! [parse_all_elements] consumes a whole document of semicolon-terminated
//! trees. Both are pure functions over the token slice, with all
//! configuration in [ParseOptions].
//!
//! The grammar is enforced as a token adjacency relation:
//!
//! | Token       | Legal after                            | Extra condition  |
//! |-------------|----------------------------------------|------------------|
//! | `(`         | start, `(`, `,`                        | tree not closed  |
//! | name        | `(`, `)`, `,`                          |                  |
//! | number      | `(`, `)`, `,`, name                    |                  |
//! | `{tag}`     | anything                               |                  |
//! | `[comment]` | anything                               |                  |
//! | `,`         | anything                               | depth > 0        |
//! | `)`         | anything but `(`                       | depth > 0        |
//! | `;`         | `)`, name, number, tag                 | depth == 0       |
//!
//! A comment is additionally a legal predecessor for every token, so
//! comments can sit anywhere in an element's token run. Comments before
//! the first content of a tree carry no element to attach to and are
//! dropped.
//!
//! An element opens with the first name, number, tag or comment after a
//! structural token and closes at the next `,`, `)` or `;`. A `)` whose
//! element never opened still closes one, which is how nameless nodes such
//! as the leaves in `(,);` come about.

use crate::lexer::{Token, TokenKind};
use crate::newick::defs::{DEFAULT_INTERNAL_NAME, DEFAULT_LEAF_NAME, DEFAULT_ROOT_NAME};
use crate::newick::element::{Element, ElementList};
use crate::newick::error::ParseError;

// =$========================================================================$=
// PARSE OPTIONS
// =$========================================================================$=
/// Configuration for Newick parsing.
///
/// The default options leave unnamed nodes unnamed. With
/// [with_default_names](ParseOptions::with_default_names) enabled, every
/// node whose text carries no name receives one of the three default
/// names at parse time.
///
/// # Example
/// ```
/// use phylink::newick::{parse_str_with, ParseOptions};
///
/// let options = ParseOptions::default()
///     .with_default_names(true)
///     .with_root_name("Origin");
/// let tree = parse_str_with("(Kea,Kaka);", &options).unwrap();
/// assert_eq!(tree.root_node().name(), "Origin");
/// ```
#[derive(Debug, Clone)]
pub struct ParseOptions {
    pub(crate) use_default_names: bool,
    pub(crate) default_leaf_name: String,
    pub(crate) default_internal_name: String,
    pub(crate) default_root_name: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            use_default_names: false,
            default_leaf_name: DEFAULT_LEAF_NAME.to_string(),
            default_internal_name: DEFAULT_INTERNAL_NAME.to_string(),
            default_root_name: DEFAULT_ROOT_NAME.to_string(),
        }
    }
}

// ============================================================================
// New, Builders
// ============================================================================
impl ParseOptions {
    /// Creates the default options.
    pub fn new() -> Self {
        ParseOptions::default()
    }

    /// Sets whether unnamed nodes receive a default name.
    pub fn with_default_names(mut self, use_default_names: bool) -> Self {
        self.use_default_names = use_default_names;
        self
    }

    /// Sets the default name for unnamed leaf nodes.
    pub fn with_leaf_name(mut self, name: impl Into<String>) -> Self {
        self.default_leaf_name = name.into();
        self
    }

    /// Sets the default name for unnamed internal nodes.
    pub fn with_internal_name(mut self, name: impl Into<String>) -> Self {
        self.default_internal_name = name.into();
        self
    }

    /// Sets the default name for an unnamed root node.
    pub fn with_root_name(mut self, name: impl Into<String>) -> Self {
        self.default_root_name = name.into();
        self
    }
}

// =$========================================================================$=
// ELEMENT PARSING
// =$========================================================================$=
/// Parses the tokens of exactly one tree into an [ElementList].
///
/// The input must hold one semicolon-terminated tree; comments and
/// whitespace may precede or follow it, anything else after the
/// semicolon is an error.
///
/// # Arguments
/// * `tokens` - Token stream as produced by a
///   [Lexer](crate::lexer::Lexer) with the
///   [Newick table](crate::newick::newick_char_table)
/// * `options` - Parse configuration
///
/// # Returns
/// The elements of the tree in closing order, or the first error.
///
/// # Example
/// ```
/// use phylink::lexer::Lexer;
/// use phylink::newick::{newick_char_table, parse_elements, ParseOptions};
///
/// let tokens = Lexer::new(newick_char_table())
///     .tokenize("((Kea,Kaka)Nestor,Kakapo)Parrots;");
/// let elements = parse_elements(&tokens, &ParseOptions::default()).unwrap();
///
/// assert_eq!(elements.len(), 5);
/// assert_eq!(elements[0].name, "Kea");
/// assert_eq!(elements.last().unwrap().name, "Parrots");
/// ```
pub fn parse_elements(
    tokens: &[Token],
    options: &ParseOptions,
) -> Result<ElementList, ParseError> {
    let mut parser = ElementParser::new(tokens);
    let elements = match parser.parse_unit(options)? {
        Some(elements) => elements,
        None => {
            let (line, column) = end_position(tokens);
            return Err(ParseError::UnexpectedEnd { line, column });
        }
    };

    if let Some(token) = parser.next_content() {
        return Err(ParseError::TrailingContent {
            line: token.line(),
            column: token.column(),
        });
    }
    Ok(elements)
}

/// Parses a document of zero or more semicolon-terminated trees.
///
/// Comments and whitespace between and after trees are ignored. An input
/// without any tree yields an empty vector.
///
/// # Arguments
/// * `tokens` - Token stream covering the whole document
/// * `options` - Parse configuration, shared by all trees
///
/// # Returns
/// One [ElementList] per tree, in document order, or the first error.
pub fn parse_all_elements(
    tokens: &[Token],
    options: &ParseOptions,
) -> Result<Vec<ElementList>, ParseError> {
    let mut parser = ElementParser::new(tokens);
    let mut lists = Vec::new();
    while let Some(elements) = parser.parse_unit(options)? {
        lists.push(elements);
    }
    Ok(lists)
}

// =$========================================================================$=
// ELEMENT PARSER
// =$========================================================================$=
/// Kind of the previously consumed token, with names and quoted strings
/// folded together and whitespace invisible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prev {
    Start,
    Open,
    Close,
    Comma,
    Name,
    Number,
    Tag,
    Comment,
}

/// Cursor over a token slice that consumes one tree per call.
struct ElementParser<'t> {
    tokens: &'t [Token],
    position: usize,
}

impl<'t> ElementParser<'t> {
    fn new(tokens: &'t [Token]) -> Self {
        ElementParser { tokens, position: 0 }
    }

    /// Returns the next token that is neither a comment nor whitespace,
    /// without consuming anything.
    fn next_content(&self) -> Option<&'t Token> {
        self.tokens[self.position..]
            .iter()
            .find(|token| !matches!(token.kind(), TokenKind::Comment | TokenKind::Whitespace))
    }

    fn next(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.position)?;
        self.position += 1;
        Some(token)
    }

    /// Consumes and parses the next tree.
    ///
    /// Returns `Ok(None)` when only comments and whitespace remain.
    fn parse_unit(&mut self, options: &ParseOptions) -> Result<Option<ElementList>, ParseError> {
        if self.next_content().is_none() {
            self.position = self.tokens.len();
            return Ok(None);
        }

        let mut elements = ElementList::new();
        // The element currently collecting content, if one has opened.
        let mut element: Option<Element> = None;
        // Nesting depth of the cursor position.
        let mut depth = 0usize;
        // Set once the outermost bracket pair has closed, so that a
        // second tree like in "(A)(B);" cannot open.
        let mut closed = false;
        let mut prev = Prev::Start;
        // Like prev, but comments are transparent. Decides whether a
        // fresh element is a leaf: it is one unless its content follows
        // a closing bracket.
        let mut prev_content = Prev::Start;

        while let Some(token) = self.next() {
            match token.kind() {
                TokenKind::Error => {
                    return Err(ParseError::Lexing {
                        message: token.text().to_string(),
                        line: token.line(),
                        column: token.column(),
                    });
                }

                TokenKind::Whitespace => continue,

                TokenKind::BracketOpen => {
                    if !matches!(prev, Prev::Start | Prev::Open | Prev::Comma | Prev::Comment) {
                        return Err(grammar("unexpected '('", token));
                    }
                    if closed {
                        return Err(grammar(
                            "tree was already closed, cannot reopen it with '('",
                            token,
                        ));
                    }
                    depth += 1;
                    prev = Prev::Open;
                    prev_content = Prev::Open;
                }

                TokenKind::Symbol | TokenKind::QuotedString => {
                    if !matches!(prev, Prev::Open | Prev::Close | Prev::Comma | Prev::Comment) {
                        return Err(grammar(
                            format!("unexpected name '{}'", token.text()),
                            token,
                        ));
                    }
                    let el = element.get_or_insert_with(|| open_element(prev_content));
                    el.name = if token.kind() == TokenKind::Symbol {
                        // Unquoted names encode spaces as underscores.
                        token.text().replace('_', " ")
                    } else {
                        token.text().to_string()
                    };
                    prev = Prev::Name;
                    prev_content = Prev::Name;
                }

                TokenKind::Number => {
                    if !matches!(
                        prev,
                        Prev::Open | Prev::Close | Prev::Comma | Prev::Name | Prev::Comment
                    ) {
                        return Err(grammar(
                            format!("unexpected number '{}'", token.text()),
                            token,
                        ));
                    }
                    let value: f64 = token.text().parse().map_err(|_| ParseError::InvalidNumber {
                        text: token.text().to_string(),
                        line: token.line(),
                        column: token.column(),
                    })?;
                    let el = element.get_or_insert_with(|| open_element(prev_content));
                    el.branch_length = Some(value);
                    prev = Prev::Number;
                    prev_content = Prev::Number;
                }

                TokenKind::Tag => {
                    let el = element.get_or_insert_with(|| open_element(prev_content));
                    el.tags.push(token.text().to_string());
                    prev = Prev::Tag;
                    prev_content = Prev::Tag;
                }

                TokenKind::Comment => {
                    if element.is_none() && prev_content == Prev::Start {
                        // Nothing to attach header comments like "[&R]" to.
                    } else {
                        let el = element.get_or_insert_with(|| open_element(prev_content));
                        el.comments.push(token.text().to_string());
                    }
                    prev = Prev::Comment;
                }

                TokenKind::Operator if token.is_operator(",") => {
                    if depth == 0 {
                        return Err(grammar("unexpected ',' outside of parentheses", token));
                    }
                    // Any predecessor except the start is legal here, and
                    // depth > 0 rules the start out.
                    let mut el = element.take().unwrap_or_else(|| open_element(prev_content));
                    el.depth = depth;
                    apply_default_name(&mut el, options);
                    elements.push(el);
                    prev = Prev::Comma;
                    prev_content = Prev::Comma;
                }

                TokenKind::BracketClose => {
                    if depth == 0 {
                        return Err(grammar("too many ')'", token));
                    }
                    if !matches!(
                        prev,
                        Prev::Close
                            | Prev::Comma
                            | Prev::Name
                            | Prev::Number
                            | Prev::Tag
                            | Prev::Comment
                    ) {
                        return Err(grammar("unexpected ')'", token));
                    }
                    let mut el = element.take().unwrap_or_else(|| open_element(prev_content));
                    el.depth = depth;
                    apply_default_name(&mut el, options);
                    elements.push(el);

                    depth -= 1;
                    if depth == 0 {
                        closed = true;
                    }
                    prev = Prev::Close;
                    prev_content = Prev::Close;
                }

                TokenKind::Operator if token.is_operator(";") => {
                    if depth != 0 {
                        return Err(grammar("not enough ')' before ';'", token));
                    }
                    if !matches!(
                        prev,
                        Prev::Close | Prev::Name | Prev::Number | Prev::Tag | Prev::Comment
                    ) {
                        return Err(grammar("unexpected ';'", token));
                    }
                    let mut el = element.take().unwrap_or_else(|| open_element(prev_content));
                    el.depth = 0;
                    if el.name.is_empty() && options.use_default_names {
                        el.name = options.default_root_name.clone();
                    }
                    elements.push(el);
                    return Ok(Some(elements));
                }

                TokenKind::Operator => {
                    return Err(grammar(
                        format!("unexpected operator '{}'", token.text()),
                        token,
                    ));
                }
            }
        }

        let (line, column) = end_position(self.tokens);
        Err(ParseError::UnexpectedEnd { line, column })
    }
}

// ============================================================================
// Internals
// ============================================================================
/// Opens a fresh element. Its content starts after the token kind
/// `prev_content`, which settles whether it is a leaf.
fn open_element(prev_content: Prev) -> Element {
    Element {
        is_leaf: matches!(prev_content, Prev::Open | Prev::Comma),
        ..Element::default()
    }
}

/// Names an unnamed non-root element when default naming is on.
fn apply_default_name(element: &mut Element, options: &ParseOptions) {
    if !element.name.is_empty() || !options.use_default_names {
        return;
    }
    element.name = if element.is_leaf {
        options.default_leaf_name.clone()
    } else {
        options.default_internal_name.clone()
    };
}

fn grammar(message: impl Into<String>, token: &Token) -> ParseError {
    ParseError::Grammar {
        message: message.into(),
        line: token.line(),
        column: token.column(),
    }
}

/// Position of the last token, for errors at the end of the input.
fn end_position(tokens: &[Token]) -> (usize, usize) {
    match tokens.last() {
        Some(token) => (token.line(), token.column()),
        None => (1, 1),
    }
}
