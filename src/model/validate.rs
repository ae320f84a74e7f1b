//! Structural validation of a [Tree].

use crate::model::Tree;

/// Checks every structural invariant of `tree` without mutating it.
///
/// Verified properties:
/// - every link chain is closed and stays at one node, and together the
///   chains cover all links,
/// - `outer` pairs are symmetric and connect two distinct nodes,
/// - every edge and its two links reference each other, and each edge's
///   secondary link is the primary link of its node, so all edges point
///   along paths converging toward the root,
/// - exactly one primary link in the whole tree is not the secondary
///   link of any edge, and it is the root link,
/// - index fields match arena positions and all counts are consistent,
/// - a round trip along the outside of the tree touches every link once,
///   i.e. the structure is connected.
///
/// Degree-2 nodes are structurally sound and pass validation; they arise
/// transiently during edits and can be dissolved with
/// [Tree::delete_linear_node()].
///
/// Returns `false` on the first violation, which makes this suitable for
/// assertions in tests after every manipulation.
pub fn validate_topology(tree: &Tree) -> bool {
    let links = tree.links();
    let nodes = tree.nodes();
    let edges = tree.edges();

    if nodes.is_empty() {
        return links.is_empty() && edges.is_empty();
    }

    // Count relations
    if edges.len() != nodes.len() - 1 {
        return false;
    }
    let expected_links = if nodes.len() == 1 { 1 } else { 2 * edges.len() };
    if links.len() != expected_links {
        return false;
    }
    let root_link = tree.root_link;
    if root_link.0 >= links.len() {
        return false;
    }

    // Per-link wiring
    for (i, link) in links.iter().enumerate() {
        if link.index.0 != i {
            return false;
        }
        if link.next.0 >= links.len() || link.outer.0 >= links.len() {
            return false;
        }
        if link.node.0 >= nodes.len() {
            return false;
        }
        if links[link.next.0].node != link.node {
            return false;
        }
        if links[link.outer.0].outer.0 != i {
            return false;
        }
        // a link paired with itself only occurs in a single-node tree
        if link.outer.0 == i && nodes.len() > 1 {
            return false;
        }
        if !edges.is_empty() {
            if link.edge.0 >= edges.len() {
                return false;
            }
            let edge = &edges[link.edge.0];
            if edge.primary.0 != i && edge.secondary.0 != i {
                return false;
            }
        }
    }

    // Per-node wiring; chains must close and together cover all links
    let mut chain_total = 0;
    for (i, node) in nodes.iter().enumerate() {
        if node.index.0 != i {
            return false;
        }
        if node.link.0 >= links.len() {
            return false;
        }
        if links[node.link.0].node.0 != i {
            return false;
        }
        let start = node.link;
        let mut cur = links[start.0].next;
        let mut length = 1;
        while cur != start {
            length += 1;
            if length > links.len() {
                return false;
            }
            cur = links[cur.0].next;
        }
        chain_total += length;
    }
    if chain_total != links.len() {
        return false;
    }

    // Per-edge wiring and rootward orientation
    for (i, edge) in edges.iter().enumerate() {
        if edge.index.0 != i {
            return false;
        }
        if edge.primary.0 >= links.len() || edge.secondary.0 >= links.len() {
            return false;
        }
        if links[edge.primary.0].edge.0 != i || links[edge.secondary.0].edge.0 != i {
            return false;
        }
        if links[edge.primary.0].node == links[edge.secondary.0].node {
            return false;
        }
        // the secondary link doubles as the primary link of its node
        let far_node = links[edge.secondary.0].node;
        if nodes[far_node.0].link != edge.secondary {
            return false;
        }
    }

    // Root designation: the root link is its node's primary link and the
    // only primary link in the tree not covered by an edge's secondary.
    if nodes[links[root_link.0].node.0].link != root_link {
        return false;
    }
    let mut is_secondary = vec![false; links.len()];
    for edge in edges {
        is_secondary[edge.secondary.0] = true;
    }
    let mut root_candidates = 0;
    for node in nodes {
        if !is_secondary[node.link.0] {
            root_candidates += 1;
            if node.link != root_link {
                return false;
            }
        }
    }
    if root_candidates != 1 {
        return false;
    }

    // Connectivity: a full round trip along the outside of the tree
    // touches every link exactly once.
    let mut cur = root_link;
    let mut steps = 0;
    loop {
        cur = links[links[cur.0].outer.0].next;
        steps += 1;
        if cur == root_link {
            break;
        }
        if steps > links.len() {
            return false;
        }
    }
    steps == links.len()
}
