//! Provides [Link], the connective tissue of a [Tree](crate::model::Tree).
//!
//! A link is a directed slot around a node. All links of a node form a
//! circular chain via `next`, one step per incident edge, and each link
//! crosses to the far side of its edge via `outer`. The whole topology of
//! a tree is encoded in these two relations; nodes and edges merely hang
//! their payloads onto the structure.

use crate::model::EdgeIndex;
use crate::model::NodeIndex;

/// Index of a [Link] in a tree arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkIndex(pub usize);

// =$========================================================================$=
// LINK
// =$========================================================================$=
/// A directed adjacency slot around a node.
///
/// Following `next` repeatedly walks the full circle of links at one node,
/// with as many steps as the node has incident edges. Following `outer`
/// jumps to the partner link at the other end of the link's edge. One link
/// per node is that node's *primary* link, pointing toward the current
/// root; the primary link of the root node is the root link of the tree.
#[derive(Debug, Clone)]
pub struct Link {
    /// Own index in the tree's link arena
    pub(crate) index: LinkIndex,

    /// Next link in the circular chain around this link's node
    pub(crate) next: LinkIndex,

    /// Partner link at the other end of this link's edge
    pub(crate) outer: LinkIndex,

    /// Node this link belongs to
    pub(crate) node: NodeIndex,

    /// Edge this link belongs to; stale in a tree with no edges
    pub(crate) edge: EdgeIndex,
}

impl Link {
    /// Own index in the tree's link arena.
    pub fn index(&self) -> LinkIndex {
        self.index
    }

    /// The next link in the circular chain around this link's node.
    pub fn next(&self) -> LinkIndex {
        self.next
    }

    /// The partner link at the other end of this link's edge.
    pub fn outer(&self) -> LinkIndex {
        self.outer
    }

    /// The node this link belongs to.
    pub fn node(&self) -> NodeIndex {
        self.node
    }

    /// The edge this link belongs to.
    ///
    /// In a single-node tree the lone link belongs to no edge and this
    /// index is meaningless.
    pub fn edge(&self) -> EdgeIndex {
        self.edge
    }
}
