//! Traversal iterators over a [Tree].
//!
//! All traversals take a *root choice*: any link can serve as the logical
//! root of one traversal without the tree being rerooted. The plain
//! `*_iter()` methods start at the tree's current root link, the
//! `*_iter_from()` variants at an arbitrary link.
//!
//! | Iterator | Order | Item |
//! |----------|-------|------|
//! | [PreorderIter] | node before its subtrees, children in link-chain order | [TraversalStep] |
//! | [LevelorderIter] | non-decreasing edge distance from the start | [TraversalStep] |
//! | [PathIter] | along the unique simple path between two links | [Link] |

use std::collections::VecDeque;

use crate::model::Edge;
use crate::model::Link;
use crate::model::LinkIndex;
use crate::model::Node;
use crate::model::NodeIndex;
use crate::model::Tree;

// =$========================================================================$=
// TRAVERSAL STEP
// =$========================================================================$=
/// One visited node of a preorder or level-order traversal.
///
/// The step's link is the link through which the node was entered, i.e.
/// the link at the visited node pointing back toward the traversal start.
/// For the start node itself it is the link the traversal was started at.
#[derive(Debug, Clone, Copy)]
pub struct TraversalStep<'a> {
    tree: &'a Tree,
    link: LinkIndex,
    depth: usize,
}

impl<'a> TraversalStep<'a> {
    /// The link through which the node was entered.
    pub fn link(&self) -> &'a Link {
        self.tree.link(self.link)
    }

    /// The visited node.
    pub fn node(&self) -> &'a Node {
        self.tree.node(self.tree.link(self.link).node())
    }

    /// The edge between the visited node and its predecessor in the
    /// traversal, or `None` for the start node.
    pub fn edge(&self) -> Option<&'a Edge> {
        if self.depth == 0 {
            None
        } else {
            Some(self.tree.edge(self.tree.link(self.link).edge()))
        }
    }

    /// Edge distance from the traversal start.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// Collects the links that cross into the subtrees hanging off the node
/// entered via `entry`. With `include_entry` the entry link's own crossing
/// is included as well, which is how a traversal start enumerates all its
/// neighbors instead of all but one.
pub(crate) fn child_crossings(tree: &Tree, entry: LinkIndex, include_entry: bool) -> Vec<LinkIndex> {
    let mut crossings = Vec::new();
    if include_entry && tree.links[entry.0].outer != entry {
        crossings.push(tree.links[entry.0].outer);
    }
    let mut cur = tree.links[entry.0].next;
    while cur != entry {
        crossings.push(tree.links[cur.0].outer);
        cur = tree.links[cur.0].next;
    }
    crossings
}

// =$========================================================================$=
// PREORDER
// =$========================================================================$=
/// Depth-first traversal visiting each node before its subtrees.
///
/// Children are visited in the order they appear around their parent's
/// link chain, which for a parsed tree is their order in the source text.
/// Visits every node exactly once.
#[derive(Debug, Clone)]
pub struct PreorderIter<'a> {
    tree: &'a Tree,
    stack: Vec<(LinkIndex, usize)>,
}

impl<'a> Iterator for PreorderIter<'a> {
    type Item = TraversalStep<'a>;

    fn next(&mut self) -> Option<TraversalStep<'a>> {
        let (link, depth) = self.stack.pop()?;
        let crossings = child_crossings(self.tree, link, depth == 0);
        for crossing in crossings.into_iter().rev() {
            self.stack.push((crossing, depth + 1));
        }
        Some(TraversalStep {
            tree: self.tree,
            link,
            depth,
        })
    }
}

// =$========================================================================$=
// LEVELORDER
// =$========================================================================$=
/// Breadth-first traversal visiting nodes by edge distance from the
/// start, ties broken by link-chain order at each parent.
///
/// Visits every node exactly once.
#[derive(Debug, Clone)]
pub struct LevelorderIter<'a> {
    tree: &'a Tree,
    queue: VecDeque<(LinkIndex, usize)>,
}

impl<'a> Iterator for LevelorderIter<'a> {
    type Item = TraversalStep<'a>;

    fn next(&mut self) -> Option<TraversalStep<'a>> {
        let (link, depth) = self.queue.pop_front()?;
        for crossing in child_crossings(self.tree, link, depth == 0) {
            self.queue.push_back((crossing, depth + 1));
        }
        Some(TraversalStep {
            tree: self.tree,
            link,
            depth,
        })
    }
}

// =$========================================================================$=
// PATH
// =$========================================================================$=
/// Iterator over the unique simple path between two links.
///
/// Yields one link per node on the path. Each yielded link sits at its
/// node and points toward the following node; the last yielded link is
/// the `to` link itself. The path is found through the lowest common
/// ancestor of the two endpoints under the current root.
#[derive(Debug, Clone)]
pub struct PathIter<'a> {
    tree: &'a Tree,
    path: Vec<LinkIndex>,
    position: usize,
}

impl<'a> Iterator for PathIter<'a> {
    type Item = &'a Link;

    fn next(&mut self) -> Option<&'a Link> {
        let link = *self.path.get(self.position)?;
        self.position += 1;
        Some(self.tree.link(link))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.path.len() - self.position;
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for PathIter<'_> {}

/// Chain of nodes from the node of `link` up to the current root,
/// following primary links.
fn node_chain_to_root(tree: &Tree, link: LinkIndex) -> Vec<NodeIndex> {
    let mut chain = Vec::new();
    let mut node = tree.links[link.0].node;
    loop {
        chain.push(node);
        if tree.is_root(node) {
            return chain;
        }
        let up = tree.nodes[node.0].link;
        node = tree.links[tree.links[up.0].outer.0].node;
    }
}

fn path_links(tree: &Tree, from: LinkIndex, to: LinkIndex) -> Vec<LinkIndex> {
    let from_chain = node_chain_to_root(tree, from);
    let to_chain = node_chain_to_root(tree, to);

    // Both chains end at the root; the length of their common tail gives
    // the lowest common ancestor.
    let mut common = 0;
    while common < from_chain.len()
        && common < to_chain.len()
        && from_chain[from_chain.len() - 1 - common] == to_chain[to_chain.len() - 1 - common]
    {
        common += 1;
    }
    let lca_from = from_chain.len() - common;
    let lca_to = to_chain.len() - common;

    let mut path = Vec::with_capacity(lca_from + lca_to + 1);
    // Upward part: each node's primary link points at its parent.
    for node in &from_chain[..lca_from] {
        path.push(tree.nodes[node.0].link);
    }
    // Downward part: the link toward a child is the partner of the
    // child's primary link.
    for j in (1..=lca_to).rev() {
        let child = to_chain[j - 1];
        let child_primary = tree.nodes[child.0].link;
        path.push(tree.links[child_primary.0].outer);
    }
    path.push(to);
    path
}

// ============================================================================
// Traversal starters on Tree (pub)
// ============================================================================
impl Tree {
    /// Preorder traversal from the current root link.
    ///
    /// # Example
    /// ```
    /// let tree = phylink::newick::parse_str("((Kea,Kaka)Nestor,Kakapo)Parrots;").unwrap();
    /// let names: Vec<&str> = tree.preorder_iter().map(|step| step.node().name()).collect();
    /// assert_eq!(names, ["Parrots", "Nestor", "Kea", "Kaka", "Kakapo"]);
    /// ```
    pub fn preorder_iter(&self) -> PreorderIter<'_> {
        self.preorder_iter_from(self.root_link)
    }

    /// Preorder traversal treating `link` as the root for this traversal.
    /// The tree itself is not rerooted.
    pub fn preorder_iter_from(&self, link: LinkIndex) -> PreorderIter<'_> {
        PreorderIter {
            tree: self,
            stack: vec![(link, 0)],
        }
    }

    /// Level-order traversal from the current root link.
    ///
    /// # Example
    /// ```
    /// let tree = phylink::newick::parse_str("((Kea,Kaka)Nestor,Kakapo)Parrots;").unwrap();
    /// let depths: Vec<usize> = tree.levelorder_iter().map(|step| step.depth()).collect();
    /// assert_eq!(depths, [0, 1, 1, 2, 2]);
    /// ```
    pub fn levelorder_iter(&self) -> LevelorderIter<'_> {
        self.levelorder_iter_from(self.root_link)
    }

    /// Level-order traversal treating `link` as the root for this
    /// traversal. The tree itself is not rerooted.
    pub fn levelorder_iter_from(&self, link: LinkIndex) -> LevelorderIter<'_> {
        let mut queue = VecDeque::new();
        queue.push_back((link, 0));
        LevelorderIter { tree: self, queue }
    }

    /// The unique simple path between the nodes of `from` and `to`.
    ///
    /// # Example
    /// ```
    /// let tree = phylink::newick::parse_str("((Kea,Kaka)Nestor,Kakapo)Parrots;").unwrap();
    /// let kea = tree.node(tree.find_node("Kea").unwrap()).link();
    /// let kakapo = tree.node(tree.find_node("Kakapo").unwrap()).link();
    /// let names: Vec<&str> = tree
    ///     .path_iter(kea, kakapo)
    ///     .map(|link| tree.node(link.node()).name())
    ///     .collect();
    /// assert_eq!(names, ["Kea", "Nestor", "Parrots", "Kakapo"]);
    /// ```
    pub fn path_iter(&self, from: LinkIndex, to: LinkIndex) -> PathIter<'_> {
        PathIter {
            tree: self,
            path: path_links(self, from, to),
            position: 0,
        }
    }
}
