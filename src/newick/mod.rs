//! Newick format parsing and writing for phylogenetic trees.
//!
//! The pipeline has three stages, each usable on its own:
//! * a [Lexer](crate::lexer::Lexer) configured with [newick_char_table]
//!   turns text into tokens
//! * [parse_elements] checks the grammar and yields a flat [ElementList]
//! * [build_tree] links the elements into a [Tree]
//!
//! [to_newick] and its relatives run the same road backwards.
//!
//! # Quick API
//! For the common cases, without assembling the pipeline by hand:
//! * [parse_str] / [parse_str_with] - one tree from a string
//! * [parse_all] / [parse_all_with] - every tree in a string
//! * [parse_file] - every tree in a file
//! * [to_newick] / [to_newick_from] - tree to string
//! * [write_newick_file] - trees to a file, one per line
//!
//! # Format
//! The accepted grammar:
//! * `tree ::= '(' branches ')' element ';'`
//! * `branches ::= branch (',' branch)*`
//! * `branch ::= '(' branches ')' element | element`
//! * `element ::= [name] [':' number] [tags and comments]`
//!
//! Furthermore:
//! * Names are either unquoted symbols, where `_` decodes to a space, or
//!   quoted strings in `'` or `"`, taken verbatim with the quote doubled
//!   to escape itself
//! * An element may be entirely empty, so `(,);` is a valid tree of
//!   three unnamed nodes
//! * Whitespace may separate tokens anywhere outside quotes
//! * `[comment]` and `{tag}` blocks may sit anywhere inside an element's
//!   token run and attach to that element; comments before a tree's
//!   first content, like a `[&R]` header, are dropped

pub mod builder;
pub mod defs;
pub mod element;
pub mod error;
pub mod parser;
pub mod writer;

// Format definition
pub use self::defs::{
    newick_char_table, DEFAULT_INTERNAL_NAME, DEFAULT_LEAF_NAME, DEFAULT_ROOT_NAME,
};
// Elements and tree building
pub use self::builder::build_tree;
pub use self::element::{Element, ElementList};
// Parsing
pub use self::error::ParseError;
pub use self::parser::{parse_all_elements, parse_elements, ParseOptions};
// Writing
pub use self::writer::{
    to_newick, to_newick_from, tree_to_elements, write_newick_file, WriteOptions,
};

use crate::lexer::Lexer;
use crate::model::Tree;
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a single Newick string into a [Tree].
///
/// The string must hold exactly one semicolon-terminated tree; comments
/// and whitespace around it are fine, a second tree is not.
///
/// # Returns
/// * [Tree] - The parsed tree
/// * [ParseError] - If the string is not a single valid Newick tree
///
/// # Example
/// ```
/// use phylink::newick::parse_str;
///
/// let tree = parse_str("((Kea,Kaka)Nestor,Kakapo)Parrots;").unwrap();
/// assert_eq!(tree.node_count(), 5);
/// assert_eq!(tree.root_node().name(), "Parrots");
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<Tree, ParseError> {
    parse_str_with(newick, &ParseOptions::default())
}

/// Parses a single Newick string into a [Tree] with the given options.
pub fn parse_str_with<S: AsRef<str>>(
    newick: S,
    options: &ParseOptions,
) -> Result<Tree, ParseError> {
    let tokens = Lexer::new(newick_char_table()).tokenize(newick.as_ref());
    let elements = parse_elements(&tokens, options)?;
    Ok(build_tree(elements))
}

/// Parses every tree in a string of semicolon-terminated Newick trees.
///
/// Trees may share a line or spread over several. An input without any
/// tree yields an empty vector.
///
/// # Example
/// ```
/// use phylink::newick::parse_all;
///
/// let trees = parse_all("(Kea,Kaka); ((A,B),C);").unwrap();
/// assert_eq!(trees.len(), 2);
/// ```
pub fn parse_all<S: AsRef<str>>(newick: S) -> Result<Vec<Tree>, ParseError> {
    parse_all_with(newick, &ParseOptions::default())
}

/// Parses every tree in a string with the given options.
pub fn parse_all_with<S: AsRef<str>>(
    newick: S,
    options: &ParseOptions,
) -> Result<Vec<Tree>, ParseError> {
    let tokens = Lexer::new(newick_char_table()).tokenize(newick.as_ref());
    let lists = parse_all_elements(&tokens, options)?;
    Ok(lists.into_iter().map(build_tree).collect())
}

/// Parses every tree in a Newick file.
///
/// # Arguments
/// * `path` - Path to a file with semicolon-terminated Newick trees
///
/// # Returns
/// * `Vec<Tree>` - All parsed trees, in file order
/// * [ParseError] - If reading fails or a tree is invalid
///
/// # Example
/// ```ignore
/// use phylink::newick::parse_file;
///
/// let trees = parse_file("parrots.nwk")?;
/// println!("parsed {} trees", trees.len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<Tree>, ParseError> {
    let contents = std::fs::read_to_string(path)?;
    parse_all(contents)
}
