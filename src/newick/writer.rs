//! Newick format writing.
//!
//! [to_newick] renders a tree rooted at its stored root link, and
//! [to_newick_from] renders from any other link without touching the
//! tree, so one tree can be printed under several rootings.
//! [write_newick_file] writes a batch of trees to a file, one per line.
//! [tree_to_elements] flattens a tree back into the [ElementList] form
//! that parsing produces, for callers that work on elements directly.

use crate::model::traverse::child_crossings;
use crate::model::{LinkIndex, Tree};
use crate::newick::defs::{DEFAULT_INTERNAL_NAME, DEFAULT_LEAF_NAME, DEFAULT_ROOT_NAME};
use crate::newick::element::{Element, ElementList};
use std::fs::File;
use std::io::{self, BufWriter, Write};

/// Extra buffer in Newick string length estimates
const BUFFER_CHARS: usize = 10;

// =$========================================================================$=
// WRITE OPTIONS
// =$========================================================================$=
/// Formatting configuration for Newick writing.
///
/// The defaults emit everything a tree carries: names, branch lengths,
/// tags and comments, with branch lengths at six decimals. Output written
/// with default options parses back to an identical tree.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    emit_names: bool,
    emit_branch_lengths: bool,
    emit_comments: bool,
    emit_tags: bool,
    numeric_precision: usize,
    use_default_names: bool,
    default_leaf_name: String,
    default_internal_name: String,
    default_root_name: String,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            emit_names: true,
            emit_branch_lengths: true,
            emit_comments: true,
            emit_tags: true,
            numeric_precision: 6,
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
impl WriteOptions {
    /// Creates the default options.
    pub fn new() -> Self {
        WriteOptions::default()
    }

    /// Sets whether node names are written.
    pub fn with_names(mut self, emit_names: bool) -> Self {
        self.emit_names = emit_names;
        self
    }

    /// Sets whether branch lengths are written.
    pub fn with_branch_lengths(mut self, emit_branch_lengths: bool) -> Self {
        self.emit_branch_lengths = emit_branch_lengths;
        self
    }

    /// Sets whether `[comment]` blocks are written.
    pub fn with_comments(mut self, emit_comments: bool) -> Self {
        self.emit_comments = emit_comments;
        self
    }

    /// Sets whether `{tag}` blocks are written.
    pub fn with_tags(mut self, emit_tags: bool) -> Self {
        self.emit_tags = emit_tags;
        self
    }

    /// Sets the number of decimals branch lengths are rounded to.
    /// Trailing zeros are trimmed after rounding.
    pub fn with_precision(mut self, numeric_precision: usize) -> Self {
        self.numeric_precision = numeric_precision;
        self
    }

    /// Sets whether unnamed nodes are written with a default name.
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
// WRITING
// =$========================================================================$=
/// Writes the given trees to a file in Newick format, one tree per line.
///
/// Each tree is written as a complete Newick string followed by a
/// newline.
///
/// # Arguments
/// * `file` - The file to write to
/// * `trees` - The trees to write
/// * `options` - Formatting configuration shared by all trees
///
/// # Errors
/// Returns an I/O error if writing fails.
///
/// # Example
/// ```ignore
/// use phylink::newick::{write_newick_file, WriteOptions};
/// use std::fs::File;
///
/// let file = File::create("parrots.nwk")?;
/// write_newick_file(file, &trees, &WriteOptions::default())?;
/// ```
pub fn write_newick_file(file: File, trees: &[Tree], options: &WriteOptions) -> io::Result<()> {
    if trees.is_empty() {
        return Ok(());
    }

    let mut writer = BufWriter::new(file);
    for tree in trees {
        let newick = to_newick(tree, options);
        writer.write_all(newick.as_bytes())?;
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    Ok(())
}

/// Returns the Newick representation of a tree, with closing semicolon.
///
/// Children are written in the order they appear around each node's link
/// cycle, which for a freshly parsed tree is their text order. The tree's
/// root link decides where rendering starts; see [to_newick_from] for
/// rendering under a different root choice.
///
/// # Example
/// ```
/// use phylink::newick::{parse_str, to_newick, WriteOptions};
///
/// let tree = parse_str("((Kea:1.5,Kaka:2)Nestor:0.5,Kakapo:4)Parrots;").unwrap();
/// let text = to_newick(&tree, &WriteOptions::default());
/// assert_eq!(text, "((Kea:1.5,Kaka:2)Nestor:0.5,Kakapo:4)Parrots;");
/// ```
pub fn to_newick(tree: &Tree, options: &WriteOptions) -> String {
    to_newick_from(tree, tree.root_link().index(), options)
}

/// Returns the Newick representation of a tree as seen from `from`.
///
/// The node owning `from` becomes the outermost element; the rest of the
/// tree arranges itself around it. The tree is not modified, so this
/// renders any rooting without the cost of [reroot](Tree::reroot).
///
/// # Arguments
/// * `tree` - The tree to write
/// * `from` - The link serving as root for this rendering
/// * `options` - Formatting configuration
///
/// # Example
/// ```
/// use phylink::newick::{parse_str, to_newick_from, WriteOptions};
///
/// let tree = parse_str("((Kea:1.5,Kaka:2)Nestor:0.5,Kakapo:4)Parrots;").unwrap();
/// let nestor = tree.find_node("Nestor").unwrap();
/// let text = to_newick_from(&tree, tree.node(nestor).link(), &WriteOptions::default());
/// assert_eq!(text, "((Kakapo:4)Parrots:0.5,Kea:1.5,Kaka:2)Nestor;");
/// ```
pub fn to_newick_from(tree: &Tree, from: LinkIndex, options: &WriteOptions) -> String {
    let mut newick = String::with_capacity(estimate_newick_len(tree, options));
    build_newick(tree, &mut newick, from, 0, options);
    newick.push(';');
    newick
}

/// Flattens a tree into elements in closing order, as seen from `from`.
///
/// This is the inverse of [build_tree](crate::newick::build_tree): feeding
/// the result back reproduces the tree with `from`'s node as root. The
/// outermost element carries no branch length.
///
/// # Example
/// ```
/// use phylink::newick::{parse_str, tree_to_elements};
///
/// let tree = parse_str("((Kea,Kaka)Nestor,Kakapo)Parrots;").unwrap();
/// let elements = tree_to_elements(&tree, tree.root_link().index());
///
/// let names: Vec<&str> = elements.iter().map(|e| e.name.as_str()).collect();
/// assert_eq!(names, ["Kea", "Kaka", "Nestor", "Kakapo", "Parrots"]);
/// ```
pub fn tree_to_elements(tree: &Tree, from: LinkIndex) -> ElementList {
    let mut elements = ElementList::new();
    collect_elements(tree, from, 0, &mut elements);
    elements
}

// ============================================================================
// Internals
// ============================================================================
/// Recursive writing helper. `entry` is the link on the node being
/// written; depth 0 marks the outermost node.
fn build_newick(
    tree: &Tree,
    newick: &mut String,
    entry: LinkIndex,
    depth: usize,
    options: &WriteOptions,
) {
    let children = child_crossings(tree, entry, depth == 0);

    if !children.is_empty() {
        newick.push('(');
        for (i, child) in children.iter().enumerate() {
            if i > 0 {
                newick.push(',');
            }
            build_newick(tree, newick, *child, depth + 1, options);
        }
        newick.push(')');
    }

    push_element(tree, newick, entry, depth, children.is_empty(), options);
}

/// Writes the element part of one node: name, branch length, comments,
/// tags. The outermost node has no edge and gets no branch length.
fn push_element(
    tree: &Tree,
    newick: &mut String,
    entry: LinkIndex,
    depth: usize,
    is_leaf: bool,
    options: &WriteOptions,
) {
    let node = tree.node(tree.link(entry).node());

    if options.emit_names {
        let name = node.name();
        if name.is_empty() && options.use_default_names {
            let default = if depth == 0 {
                &options.default_root_name
            } else if is_leaf {
                &options.default_leaf_name
            } else {
                &options.default_internal_name
            };
            newick.push_str(&escape_name(default));
        } else {
            newick.push_str(&escape_name(name));
        }
    }

    if options.emit_branch_lengths && depth > 0 {
        let branch_length = tree.edge(tree.link(entry).edge()).data().branch_length;
        newick.push(':');
        newick.push_str(&format_branch_length(branch_length, options.numeric_precision));
    }

    if options.emit_comments {
        for comment in &node.data().comments {
            newick.push('[');
            newick.push_str(comment);
            newick.push(']');
        }
    }

    if options.emit_tags {
        for tag in &node.data().tags {
            newick.push('{');
            newick.push_str(tag);
            newick.push('}');
        }
    }
}

/// Recursive helper for [tree_to_elements].
fn collect_elements(tree: &Tree, entry: LinkIndex, depth: usize, elements: &mut ElementList) {
    let children = child_crossings(tree, entry, depth == 0);
    for child in &children {
        collect_elements(tree, *child, depth + 1, elements);
    }

    let node = tree.node(tree.link(entry).node());
    let branch_length = if depth == 0 {
        None
    } else {
        Some(tree.edge(tree.link(entry).edge()).data().branch_length)
    };
    elements.push(Element {
        name: node.name().to_string(),
        branch_length,
        depth,
        is_leaf: children.is_empty(),
        tags: node.data().tags.clone(),
        comments: node.data().comments.clone(),
    });
}

/// Renders a name for output. Names that survive the unquoted symbol
/// grammar have their spaces turned back into underscores; everything
/// else is single-quoted, with quotes doubled.
fn escape_name(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }

    let unquoted_safe = !name.contains('_')
        && name.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '-' | ' '));
    if unquoted_safe {
        return name.replace(' ', "_");
    }

    let mut quoted = String::with_capacity(name.len() + 2);
    quoted.push('\'');
    for ch in name.chars() {
        if ch == '\'' {
            quoted.push('\'');
        }
        quoted.push(ch);
    }
    quoted.push('\'');
    quoted
}

/// Formats a branch length with the given number of decimals, then trims
/// trailing zeros and a bare trailing dot.
fn format_branch_length(value: f64, precision: usize) -> String {
    let mut text = format!("{value:.precision$}");
    if text.contains('.') {
        text.truncate(text.trim_end_matches('0').len());
        text.truncate(text.trim_end_matches('.').len());
    }
    text
}

/// Estimates the length of the Newick string for a tree, to size the
/// output buffer once up front.
fn estimate_newick_len(tree: &Tree, options: &WriteOptions) -> usize {
    // Each internal node contributes around "(,)", each branch length
    // around ":0.123456".
    const STRUCTURE_CHARS: usize = 3;
    const BRANCH_LENGTH_CHARS: usize = 12;

    let mut estimate = tree.node_count() * STRUCTURE_CHARS + BUFFER_CHARS;
    if options.emit_branch_lengths {
        estimate += tree.edge_count() * BRANCH_LENGTH_CHARS;
    }
    if options.emit_names {
        estimate += tree
            .nodes()
            .iter()
            .map(|node| node.name().len() + 1)
            .sum::<usize>();
    }
    estimate
}
