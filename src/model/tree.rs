//! Provides [Tree], the arena that owns all links, nodes and edges.

use std::ops::Index;
use std::ops::IndexMut;

use crate::model::Edge;
use crate::model::EdgeIndex;
use crate::model::Link;
use crate::model::LinkIndex;
use crate::model::Node;
use crate::model::NodeIndex;

// =$========================================================================$=
// TREE
// =$========================================================================$=
/// A rooted tree stored as three arenas of [Link]s, [Node]s and [Edge]s.
///
/// All relations between the parts are indices into these arenas, never
/// references, so a tree can be cloned into a fully independent copy and
/// mutated without any dangling-pointer hazards. Index sets are dense at
/// all times: after every operation, links, nodes and edges each occupy
/// the contiguous range `0..count` of their arena.
///
/// # Structure
/// - Each node's links form a circular `next` chain, one link per
///   incident edge.
/// - Each link's `outer` partner sits at the far end of the same edge.
/// - One link is the *root link*; it is the primary link of the root
///   node, and every edge's primary/secondary orientation points along
///   the paths converging toward it.
///
/// Trees are created by parsing, see
/// [parse_str](crate::newick::parse_str), and changed through the
/// manipulation methods such as [Tree::reroot()] or [Tree::delete_node()].
/// Structural health can be checked at any time with
/// [validate_topology](crate::model::validate_topology).
#[derive(Debug, Clone)]
pub struct Tree {
    /// Links of this tree (arena pattern)
    pub(crate) links: Vec<Link>,

    /// Nodes of this tree (arena pattern)
    pub(crate) nodes: Vec<Node>,

    /// Edges of this tree (arena pattern)
    pub(crate) edges: Vec<Edge>,

    /// The link designating the current root
    pub(crate) root_link: LinkIndex,
}

// ============================================================================
// Counts, Getters / Accessors (pub)
// ============================================================================
impl Tree {
    /// Number of links in this tree.
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Number of nodes in this tree.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges in this tree. Always one less than the number of
    /// nodes.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// The link designating the current root.
    pub fn root_link(&self) -> &Link {
        &self.links[self.root_link.0]
    }

    /// The node at the current root.
    pub fn root_node(&self) -> &Node {
        let node = self.links[self.root_link.0].node;
        &self.nodes[node.0]
    }

    /// The link at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn link(&self, index: LinkIndex) -> &Link {
        &self.links[index.0]
    }

    /// The node at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.nodes[index.0]
    }

    /// The edge at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn edge(&self, index: EdgeIndex) -> &Edge {
        &self.edges[index.0]
    }

    /// All links, indexed by [LinkIndex].
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// All nodes, indexed by [NodeIndex].
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges, indexed by [EdgeIndex].
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

// ============================================================================
// Queries (pub)
// ============================================================================
impl Tree {
    /// Number of links around `node`, i.e. its number of incident edges.
    ///
    /// The lone node of a single-node tree reports degree 1, its one link
    /// chains to itself.
    pub fn degree(&self, node: NodeIndex) -> usize {
        let start = self.nodes[node.0].link;
        let mut count = 1;
        let mut link = self.links[start.0].next;
        while link != start {
            count += 1;
            link = self.links[link.0].next;
        }
        count
    }

    /// Checks whether `node` has exactly one link.
    pub fn is_leaf(&self, node: NodeIndex) -> bool {
        self.degree(node) == 1
    }

    /// Checks whether `node` has more than one link.
    pub fn is_inner(&self, node: NodeIndex) -> bool {
        self.degree(node) > 1
    }

    /// Checks whether `node` has exactly two links. Such nodes arise
    /// transiently during edits, e.g. after deleting one of two children,
    /// and can be dissolved with [Tree::delete_linear_node()].
    pub fn is_linear(&self, node: NodeIndex) -> bool {
        self.degree(node) == 2
    }

    /// Checks whether `node` is the current root node.
    pub fn is_root(&self, node: NodeIndex) -> bool {
        self.links[self.root_link.0].node == node
    }

    /// Finds the first node whose name equals `name`.
    ///
    /// Returns `None` if no node carries that name.
    pub fn find_node(&self, name: &str) -> Option<NodeIndex> {
        self.nodes
            .iter()
            .find(|node| node.data.name == name)
            .map(|node| node.index)
    }
}

// ============================================================================
// Printing (pub)
// ============================================================================
impl Tree {
    /// Prints a visual representation of the tree to the console.
    ///
    /// # Example Output
    /// ```text
    /// Tree with 4 nodes, 3 edges:
    /// [0] "R"
    ///   ├─ [2] "A" (branch: 0.100)
    ///   └─ [1] "B" (branch: 0.200)
    /// ```
    pub fn print_tree(&self) {
        println!(
            "Tree with {} nodes, {} edges:",
            self.node_count(),
            self.edge_count()
        );
        self.print_subtree(self.root_link, "", true, true);
    }

    /// Helper to recursively print one subtree.
    fn print_subtree(&self, entry: LinkIndex, prefix: &str, is_start: bool, is_last: bool) {
        let link = &self.links[entry.0];
        let node = &self.nodes[link.node.0];

        let connector = if is_start {
            ""
        } else if is_last {
            "└─ "
        } else {
            "├─ "
        };
        let branch = if is_start {
            String::new()
        } else {
            format!(
                " (branch: {:.3})",
                self.edges[link.edge.0].data.branch_length
            )
        };
        println!(
            "{}{}[{}] \"{}\"{}",
            prefix, connector, node.index.0, node.data.name, branch
        );

        let mut children = Vec::new();
        if is_start {
            children.push(link.outer);
        }
        let mut cur = link.next;
        while cur != entry {
            children.push(self.links[cur.0].outer);
            cur = self.links[cur.0].next;
        }
        // The lone link of a single-node tree crosses to itself.
        children.retain(|child| *child != entry);

        let child_prefix = if is_start {
            "  ".to_string()
        } else {
            format!("{}{}  ", prefix, if is_last { " " } else { "│" })
        };
        let count = children.len();
        for (i, child) in children.into_iter().enumerate() {
            self.print_subtree(child, &child_prefix, false, i + 1 == count);
        }
    }
}

// =$========================================================================$=
// INDEX OPERATORS
// =$========================================================================$=
impl Index<LinkIndex> for Tree {
    type Output = Link;

    fn index(&self, index: LinkIndex) -> &Link {
        &self.links[index.0]
    }
}

impl Index<NodeIndex> for Tree {
    type Output = Node;

    fn index(&self, index: NodeIndex) -> &Node {
        &self.nodes[index.0]
    }
}

impl IndexMut<NodeIndex> for Tree {
    fn index_mut(&mut self, index: NodeIndex) -> &mut Node {
        &mut self.nodes[index.0]
    }
}

impl Index<EdgeIndex> for Tree {
    type Output = Edge;

    fn index(&self, index: EdgeIndex) -> &Edge {
        &self.edges[index.0]
    }
}

impl IndexMut<EdgeIndex> for Tree {
    fn index_mut(&mut self, index: EdgeIndex) -> &mut Edge {
        &mut self.edges[index.0]
    }
}
