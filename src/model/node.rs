//! Provides [Node] and its payload [NodeData].

use crate::model::LinkIndex;

/// Index of a [Node] in a tree arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeIndex(pub usize);

// =$========================================================================$=
// NODE
// =$========================================================================$=
/// A node of a tree: a payload plus a reference to one of its links.
///
/// The referenced link is the node's *primary* link, pointing toward the
/// current root. Manipulation operations keep it up to date when the root
/// moves.
#[derive(Debug, Clone)]
pub struct Node {
    /// Own index in the tree's node arena
    pub(crate) index: NodeIndex,

    /// Primary link of this node, pointing toward the current root
    pub(crate) link: LinkIndex,

    /// Payload
    pub(crate) data: NodeData,
}

impl Node {
    /// Own index in the tree's node arena.
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    /// The primary link of this node, pointing toward the current root.
    pub fn link(&self) -> LinkIndex {
        self.link
    }

    pub fn data(&self) -> &NodeData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut NodeData {
        &mut self.data
    }

    /// Shorthand for the name in this node's payload.
    pub fn name(&self) -> &str {
        &self.data.name
    }
}

// =$========================================================================$=
// NODE DATA
// =$========================================================================$=
/// Payload of a [Node]: its name and the annotations that were attached
/// to the corresponding element in the source text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeData {
    /// Name of the node; empty for unnamed nodes
    pub name: String,

    /// Comment blocks in source order
    pub comments: Vec<String>,

    /// Tag blocks in source order
    pub tags: Vec<String>,
}

impl NodeData {
    /// Creates a payload with the given name and no annotations.
    pub fn with_name(name: impl Into<String>) -> Self {
        NodeData {
            name: name.into(),
            comments: Vec::new(),
            tags: Vec::new(),
        }
    }
}
