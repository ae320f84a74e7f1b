//! Turns an [ElementList] into a [Tree].
//!
//! The list orders elements by their closing character, so children come
//! before their parent and the root is last. The builder walks the list in
//! reverse. Every node first allocates its primary link, then one link per
//! remaining child slot; child slots go onto a stack, and each later
//! element takes the top slot as the parent side of its edge. Subtrees are
//! contiguous in closing order, which makes the top of the stack always
//! the right parent.
//!
//! Index order falls out of the walk: node, link and edge indices all
//! count outward from the root, and the root's primary link is link 0.

use crate::model::{Edge, EdgeData, EdgeIndex, Link, LinkIndex, Node, NodeData, NodeIndex, Tree};
use crate::newick::element::ElementList;

// =$========================================================================$=
// TREE BUILDING
// =$========================================================================$=
/// Builds a [Tree] from elements in closing order.
///
/// Branch lengths of the elements become edge data; an element without
/// one gets the default of `0.0`. The root element's branch length has no
/// edge to live on and is dropped.
///
/// # Panics
/// Panics if the element depths do not describe exactly one tree with
/// children closing before their parent. Lists produced by
/// [parse_elements](crate::newick::parse_elements) always do.
///
/// # Example
/// ```
/// use phylink::lexer::Lexer;
/// use phylink::newick::{build_tree, newick_char_table, parse_elements, ParseOptions};
///
/// let tokens = Lexer::new(newick_char_table())
///     .tokenize("((Kea,Kaka)Nestor,Kakapo)Parrots;");
/// let elements = parse_elements(&tokens, &ParseOptions::default()).unwrap();
/// let tree = build_tree(elements);
///
/// assert_eq!(tree.node_count(), 5);
/// assert_eq!(tree.edge_count(), 4);
/// assert_eq!(tree.root_node().name(), "Parrots");
/// ```
pub fn build_tree(elements: ElementList) -> Tree {
    let ranks = compute_ranks(&elements);

    let mut links: Vec<Link> = Vec::with_capacity(2 * elements.len());
    let mut nodes: Vec<Node> = Vec::with_capacity(elements.len());
    let mut edges: Vec<Edge> = Vec::with_capacity(elements.len() - 1);

    // Parent-side links waiting for the child subtree that fills them.
    let mut stack: Vec<LinkIndex> = Vec::new();

    for (element, rank) in elements.into_iter().zip(ranks).rev() {
        let up = LinkIndex(links.len());
        let node_index = NodeIndex(nodes.len());

        if element.depth == 0 {
            // The root's primary link has no edge toward a parent. It still
            // joins the child rotation: the first child in text order pops
            // it from the stack and hangs its edge there.
            links.push(Link {
                index: up,
                next: up,
                outer: up,
                node: node_index,
                edge: EdgeIndex(0),
            });
            if rank > 0 {
                stack.push(up);
            }
        } else {
            let parent_link = stack.pop().expect("a parent slot exists below the root");
            let edge_index = EdgeIndex(edges.len());
            edges.push(Edge {
                index: edge_index,
                primary: parent_link,
                secondary: up,
                data: EdgeData::with_branch_length(element.branch_length.unwrap_or(0.0)),
            });
            links.push(Link {
                index: up,
                next: up,
                outer: parent_link,
                node: node_index,
                edge: edge_index,
            });
            links[parent_link.0].outer = up;
            links[parent_link.0].edge = edge_index;
        }

        nodes.push(Node {
            index: node_index,
            link: up,
            data: NodeData {
                name: element.name,
                comments: element.comments,
                tags: element.tags,
            },
        });

        // One further link per child beyond the one the primary link
        // serves at the root. They close the cycle up -> downs -> up and
        // wait on the stack in reverse text order of the children.
        let down_count = if element.depth == 0 {
            rank.saturating_sub(1)
        } else {
            rank
        };
        let mut previous = up;
        for _ in 0..down_count {
            let down = LinkIndex(links.len());
            links.push(Link {
                index: down,
                next: up,
                outer: down,
                node: node_index,
                edge: EdgeIndex(0),
            });
            links[previous.0].next = down;
            stack.push(down);
            previous = down;
        }
    }

    debug_assert!(stack.is_empty());

    Tree {
        links,
        nodes,
        edges,
        root_link: LinkIndex(0),
    }
}

// ============================================================================
// Internals
// ============================================================================
/// Number of children of each element, from the depth sequence.
///
/// Walking in closing order, all children of an element have been seen,
/// and counted one depth level down, by the time the element itself
/// arrives. The leftover counters double as a shape check.
///
/// # Panics
/// Panics if the list is empty, has more or less than one depth-0
/// element, or leaves elements without a parent.
fn compute_ranks(elements: &ElementList) -> Vec<usize> {
    assert!(!elements.is_empty(), "cannot build a tree from an empty element list");

    let mut ranks = Vec::with_capacity(elements.len());
    let mut counters: Vec<usize> = Vec::new();
    for element in elements {
        let depth = element.depth;
        if counters.len() < depth + 2 {
            counters.resize(depth + 2, 0);
        }
        ranks.push(counters[depth + 1]);
        counters[depth + 1] = 0;
        counters[depth] += 1;
    }

    let single_tree = counters[0] == 1 && counters[1..].iter().all(|&c| c == 0);
    assert!(single_tree, "element depths do not form a single tree");

    ranks
}
