//! Phylink is a library to parse, manipulate and write phylogenetic
//! trees in Newick format.
//!
//! This crate offers a configurable parser and writer for Newick strings
//! together with a mutable linked tree model.
//! Core functionality provided:
//! - Newick: Parse single strings, strings of several trees, or files,
//!   and write trees back with configurable output, see [crate::newick].
//! - Tree model: Trees are three arenas of [Link](crate::model::Link)s,
//!   [Node](crate::model::Node)s and [Edge](crate::model::Edge)s; the
//!   links carry the whole topology as a circular chain per node plus a
//!   crossing per edge, so the same structure serves rooted and
//!   unrooted views. See [crate::model] for more details.
//! - Traversal: Preorder, level-order and node-to-node path iterators,
//!   each startable from any link, not just the root.
//! - Manipulation: Rerooting at any link, inserting nodes on nodes or
//!   edges, and deleting leaves, degree-2 nodes or whole subtrees, with
//!   dense indices restored after every operation.
//! - Validation: A full structural check over the link, node and edge
//!   wiring for use in tests and after hand-built edits.
//! - Annotations: `[comment]` and `{tag}` blocks survive parsing on the
//!   node they belong to and can be written back out.
//!
//! Limitations:
//! - Arbitrary node degrees are supported, but multifurcations cannot
//!   be resolved into binary form automatically
//! - Branch lengths are plain `f64` values; absent lengths parse as `0`
//! - Files are read fully into memory before parsing
//!
//! # Usage patterns
//! Can parse trees in two main ways:
//! 1. Several methods provide quick access to parsing with default
//!    settings. See [crate::newick] documentation.
//! 2. Run the pipeline stages yourself, with a
//!    [Lexer](crate::lexer::Lexer) over the
//!    [newick_char_table](crate::newick::newick_char_table),
//!    [parse_elements](crate::newick::parse_elements) with custom
//!    [ParseOptions](crate::newick::ParseOptions), and
//!    [build_tree](crate::newick::build_tree), for full control over
//!    default names and error handling per stage.
//!
//! ## Example Default Configuration
//!
//! Parse a single Newick string:
//! ```
//! use phylink::parse_newick_str;
//!
//! let tree = parse_newick_str("((A:0.1,B:0.2)C:0.3,D:0.4)E;").unwrap();
//! assert_eq!(tree.node_count(), 5);
//! assert_eq!(tree.root_node().name(), "E");
//! ```
//!
//! Parse a Newick file:
//! ```no_run
//! use phylink::parse_newick_file;
//!
//! let trees = parse_newick_file("parrots.nwk").unwrap();
//! println!("Loaded {} trees", trees.len());
//! ```
//!
//! ## Example Manipulation and Writing
//!
//! Reroot a tree at a named node and write it back out:
//! ```
//! use phylink::newick::{parse_str, to_newick, WriteOptions};
//!
//! let mut tree = parse_str("((Kea,Kaka)Nestor,Kakapo)Parrots;").unwrap();
//! let nestor = tree.find_node("Nestor").unwrap();
//! tree.reroot_at_node(nestor);
//!
//! let text = to_newick(&tree, &WriteOptions::default());
//! assert_eq!(text, "((Kakapo:0)Parrots:0,Kea:0,Kaka:0)Nestor;");
//! ```

pub mod lexer;
pub mod model;
pub mod newick;

use crate::model::Tree;
use crate::newick::ParseError;
use std::path::Path;

// ============================================================================
// Quick Newick API
// ============================================================================
/// Parses a single Newick string using default settings,
/// returning a [Tree].
///
/// See [`newick::parse_str`] for full documentation of this convenience
/// function.
pub fn parse_newick_str<S: AsRef<str>>(newick: S) -> Result<Tree, ParseError> {
    newick::parse_str(newick)
}

/// Parses a file containing a semicolon-separated list of Newick strings
/// using default settings, returning a vector of [Tree]s.
///
/// See [`newick::parse_file`] for full documentation of this convenience
/// function.
pub fn parse_newick_file<P: AsRef<Path>>(path: P) -> Result<Vec<Tree>, ParseError> {
    newick::parse_file(path)
}
