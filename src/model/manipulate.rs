//! Topology manipulation on a [Tree]: rerooting, insertion, deletion.
//!
//! | Operation | Effect |
//! |-----------|--------|
//! | [Tree::reroot()] | moves the root designation to another link |
//! | [Tree::add_new_node()] | attaches a new leaf below an existing node |
//! | [Tree::add_new_node_on_edge()] | splits an edge with a new node |
//! | [Tree::add_new_leaf_node()] | splits an edge and hangs a leaf off the split |
//! | [Tree::delete_leaf_node()] | removes a leaf and its edge |
//! | [Tree::delete_linear_node()] | dissolves a degree-2 node, merging its edges |
//! | [Tree::delete_subtree()] | removes a node and everything below it |
//! | [Tree::delete_node()] | dispatches to one of the three deletions by degree |
//!
//! Every operation leaves the tree structurally sound: link chains closed,
//! `outer` pairs symmetric, edge directions converging toward the root,
//! and all three index ranges dense. Insertions append at the next free
//! indices; deletions compact the arenas afterwards, so indices held
//! across a deletion must be considered invalid.

use crate::model::Edge;
use crate::model::EdgeData;
use crate::model::EdgeIndex;
use crate::model::Link;
use crate::model::LinkIndex;
use crate::model::Node;
use crate::model::NodeData;
use crate::model::NodeIndex;
use crate::model::Tree;

// ============================================================================
// Rerooting (pub)
// ============================================================================
impl Tree {
    /// Makes `at_link` the root link of this tree.
    ///
    /// Flips the primary/secondary designation of every edge on the path
    /// from the old root to the new one and repoints the primary links of
    /// the nodes along it. Indices, payloads and the undirected adjacency
    /// are untouched. Rerooting at a different link of the current root
    /// node flips no edge but changes the order in which children are
    /// enumerated, since traversals start their walk at the root link.
    ///
    /// # Example
    /// ```
    /// let mut tree = phylink::newick::parse_str("((Kea,Kaka)Nestor,Kakapo)Parrots;").unwrap();
    /// let kea = tree.find_node("Kea").unwrap();
    /// tree.reroot(tree.node(kea).link());
    /// assert_eq!(tree.root_node().name(), "Kea");
    /// ```
    pub fn reroot(&mut self, at_link: LinkIndex) {
        let old_root_node = self.links[self.root_link.0].node;
        let at_node = self.links[at_link.0].node;

        // `link` points from the node being processed toward the old root.
        let mut link = self.nodes[at_node.0].link;
        self.nodes[at_node.0].link = at_link;
        self.root_link = at_link;

        let mut node = at_node;
        while node != old_root_node {
            let edge = self.links[link.0].edge;
            let outer = self.links[link.0].outer;
            self.edges[edge.0].primary = link;
            self.edges[edge.0].secondary = outer;

            node = self.links[outer.0].node;
            let next_link = self.nodes[node.0].link;
            self.nodes[node.0].link = outer;
            link = next_link;
        }
    }

    /// Makes `node` the root node, keeping its child enumeration order.
    ///
    /// Reroots at the node's current primary link. A no-op if `node`
    /// already is the root.
    pub fn reroot_at_node(&mut self, node: NodeIndex) {
        let link = self.nodes[node.0].link;
        self.reroot(link);
    }
}

// ============================================================================
// Insertion (pub)
// ============================================================================
impl Tree {
    /// Attaches a brand-new leaf node below `node`, connected by a new
    /// edge, and returns its index.
    ///
    /// The connecting link is spliced in as the last child position of
    /// `node`. The new node, its link and the new edge all get the next
    /// free index of their arena; the new edge's branch length is `0.0`.
    /// On a single-node tree the lone placeholder link is reused to carry
    /// the first real edge.
    ///
    /// # Panics
    /// Panics if `node` is out of range.
    pub fn add_new_node(&mut self, node: NodeIndex) -> NodeIndex {
        let new_node = NodeIndex(self.nodes.len());
        let new_edge = EdgeIndex(self.edges.len());

        let con_link = if self.edges.is_empty() {
            // single-node tree: its self-looped link takes the new edge
            let lone = self.nodes[node.0].link;
            self.links[lone.0].edge = new_edge;
            lone
        } else {
            let con_link = LinkIndex(self.links.len());
            let first = self.nodes[node.0].link;
            let pred = self.cycle_predecessor(first);
            self.links.push(Link {
                index: con_link,
                next: first,
                outer: con_link,
                node,
                edge: new_edge,
            });
            self.links[pred.0].next = con_link;
            con_link
        };

        let leaf_link = LinkIndex(self.links.len());
        self.links.push(Link {
            index: leaf_link,
            next: leaf_link,
            outer: con_link,
            node: new_node,
            edge: new_edge,
        });
        self.links[con_link.0].outer = leaf_link;

        self.nodes.push(Node {
            index: new_node,
            link: leaf_link,
            data: NodeData::default(),
        });
        self.edges.push(Edge {
            index: new_edge,
            primary: con_link,
            secondary: leaf_link,
            data: EdgeData::default(),
        });
        new_node
    }

    /// Splits `edge` by inserting a new node in its middle and returns
    /// the new node's index.
    ///
    /// The existing edge keeps its rootward half including its full
    /// branch length; the new edge takes the leafward half with branch
    /// length `0.0`. Use [Tree::add_new_node_on_edge_with()] to
    /// redistribute the length between the two.
    ///
    /// # Panics
    /// Panics if `edge` is out of range.
    pub fn add_new_node_on_edge(&mut self, edge: EdgeIndex) -> NodeIndex {
        self.add_new_node_on_edge_with(edge, |_, _| {})
    }

    /// Like [Tree::add_new_node_on_edge()], but calls `merge` with the
    /// payloads of the kept rootward edge and the new leafward edge, in
    /// that order, so the caller can redistribute the branch length.
    ///
    /// # Example
    /// ```
    /// let mut tree = phylink::newick::parse_str("(Kea:3.0,Kaka:1.0)Nestor;").unwrap();
    /// let kea = tree.find_node("Kea").unwrap();
    /// let above = tree.link(tree.node(kea).link()).edge();
    /// tree.add_new_node_on_edge_with(above, |kept, new| {
    ///     new.branch_length = kept.branch_length / 2.0;
    ///     kept.branch_length /= 2.0;
    /// });
    /// assert_eq!(tree.edge(above).data().branch_length, 1.5);
    /// ```
    pub fn add_new_node_on_edge_with<F>(&mut self, edge: EdgeIndex, merge: F) -> NodeIndex
    where
        F: FnOnce(&mut EdgeData, &mut EdgeData),
    {
        let rootward = LinkIndex(self.links.len());
        let leafward = LinkIndex(self.links.len() + 1);
        let new_node = NodeIndex(self.nodes.len());
        let new_edge = EdgeIndex(self.edges.len());

        let old_primary = self.edges[edge.0].primary;
        let old_secondary = self.edges[edge.0].secondary;

        self.links.push(Link {
            index: rootward,
            next: leafward,
            outer: old_primary,
            node: new_node,
            edge,
        });
        self.links.push(Link {
            index: leafward,
            next: rootward,
            outer: old_secondary,
            node: new_node,
            edge: new_edge,
        });
        self.links[old_primary.0].outer = rootward;
        self.links[old_secondary.0].outer = leafward;
        self.links[old_secondary.0].edge = new_edge;

        self.nodes.push(Node {
            index: new_node,
            link: rootward,
            data: NodeData::default(),
        });
        self.edges[edge.0].secondary = rootward;
        self.edges.push(Edge {
            index: new_edge,
            primary: leafward,
            secondary: old_secondary,
            data: EdgeData::default(),
        });

        let (kept, new) = self.edge_data_pair_mut(edge, new_edge);
        merge(kept, new);
        new_node
    }

    /// Splits `edge` and attaches a new leaf to the node created by the
    /// split. Returns the index of the new leaf node; the split node is
    /// the leaf's neighbor toward the root.
    ///
    /// # Panics
    /// Panics if `edge` is out of range.
    pub fn add_new_leaf_node(&mut self, edge: EdgeIndex) -> NodeIndex {
        self.add_new_leaf_node_with(edge, |_, _| {})
    }

    /// Like [Tree::add_new_leaf_node()], with a `merge` function applied
    /// to the two halves of the split edge as in
    /// [Tree::add_new_node_on_edge_with()].
    pub fn add_new_leaf_node_with<F>(&mut self, edge: EdgeIndex, merge: F) -> NodeIndex
    where
        F: FnOnce(&mut EdgeData, &mut EdgeData),
    {
        let inner = self.add_new_node_on_edge_with(edge, merge);
        self.add_new_node(inner)
    }
}

// ============================================================================
// Deletion (pub)
// ============================================================================
impl Tree {
    /// Removes `node`, dispatching on its degree: leaves are deleted with
    /// their edge, degree-2 nodes are dissolved, and higher-degree nodes
    /// are removed together with their whole subtree.
    ///
    /// # Panics
    /// Panics if `node` is out of range, if it is the last node of the
    /// tree, or if it is an inner root node, whose "subtree" would be the
    /// entire tree.
    pub fn delete_node(&mut self, node: NodeIndex) {
        match self.degree(node) {
            1 => self.delete_leaf_node(node),
            2 => self.delete_linear_node(node),
            _ => self.delete_subtree(node),
        }
    }

    /// Removes the leaf `node` and its edge, then compacts all indices.
    ///
    /// The parent keeps its remaining links in order; deleting one of the
    /// two children of a binary parent leaves that parent with degree 2,
    /// to be dissolved with [Tree::delete_linear_node()] if unwanted.
    /// Deleting the root leaf hands the root to its neighbor. Deleting
    /// one of the two nodes of a two-node tree leaves a single-node tree.
    ///
    /// # Panics
    /// Panics if `node` is not a leaf or is the last node of the tree.
    pub fn delete_leaf_node(&mut self, node: NodeIndex) {
        assert!(
            self.is_leaf(node),
            "delete_leaf_node: node {} is not a leaf",
            node.0
        );
        assert!(
            self.node_count() > 1,
            "cannot delete the last node of a tree"
        );

        let leaf_link = self.nodes[node.0].link;
        let partner = self.links[leaf_link.0].outer;
        let dead_edge = self.links[leaf_link.0].edge;

        if self.node_count() == 2 {
            // survivor becomes a single-node tree with a self-looped link
            self.links[partner.0].outer = partner;
            self.root_link = partner;
            let mut dead_links = vec![false; self.links.len()];
            dead_links[leaf_link.0] = true;
            let mut dead_nodes = vec![false; self.nodes.len()];
            dead_nodes[node.0] = true;
            let mut dead_edges = vec![false; self.edges.len()];
            dead_edges[dead_edge.0] = true;
            self.compact(&dead_links, &dead_nodes, &dead_edges);
            return;
        }

        // deleting the root leaf hands the root to the neighbor
        if self.is_root(node) {
            let at = self.links[partner.0].next;
            self.reroot(at);
        }

        // unhook the partner link from the parent's chain
        let partner_next = self.links[partner.0].next;
        let pred = self.cycle_predecessor(partner);
        self.links[pred.0].next = partner_next;
        let parent = self.links[partner.0].node;
        if self.nodes[parent.0].link == partner {
            self.nodes[parent.0].link = partner_next;
            if self.root_link == partner {
                self.root_link = partner_next;
            }
        }

        let mut dead_links = vec![false; self.links.len()];
        dead_links[leaf_link.0] = true;
        dead_links[partner.0] = true;
        let mut dead_nodes = vec![false; self.nodes.len()];
        dead_nodes[node.0] = true;
        let mut dead_edges = vec![false; self.edges.len()];
        dead_edges[dead_edge.0] = true;
        self.compact(&dead_links, &dead_nodes, &dead_edges);
    }

    /// Dissolves the degree-2 `node`, splicing its two neighbors together
    /// and summing the two branch lengths into the surviving edge.
    ///
    /// # Panics
    /// Panics if `node` does not have degree 2.
    pub fn delete_linear_node(&mut self, node: NodeIndex) {
        self.delete_linear_node_with(node, |kept, removed| {
            kept.branch_length += removed.branch_length;
        });
    }

    /// Like [Tree::delete_linear_node()], but calls `merge` with the
    /// payloads of the kept rootward edge and the removed leafward edge,
    /// in that order, instead of summing branch lengths.
    ///
    /// If `node` is the root, the root is first handed to the neighbor
    /// reached through the node's primary link; the kept edge is the one
    /// connecting that neighbor.
    pub fn delete_linear_node_with<F>(&mut self, node: NodeIndex, merge: F)
    where
        F: FnOnce(&mut EdgeData, &mut EdgeData),
    {
        assert!(
            self.is_linear(node),
            "delete_linear_node: node {} does not have degree 2",
            node.0
        );

        if self.is_root(node) {
            let primary = self.nodes[node.0].link;
            let neighbor_link = self.links[primary.0].outer;
            self.reroot(neighbor_link);
        }

        let a = self.nodes[node.0].link;
        let b = self.links[a.0].next;
        let outer_a = self.links[a.0].outer;
        let outer_b = self.links[b.0].outer;
        let kept_edge = self.links[a.0].edge;
        let dead_edge = self.links[b.0].edge;

        // splice the neighbors together over the kept edge
        self.links[outer_a.0].outer = outer_b;
        self.links[outer_b.0].outer = outer_a;
        self.links[outer_b.0].edge = kept_edge;
        self.edges[kept_edge.0].secondary = outer_b;

        let (kept, removed) = self.edge_data_pair_mut(kept_edge, dead_edge);
        merge(kept, removed);

        let mut dead_links = vec![false; self.links.len()];
        dead_links[a.0] = true;
        dead_links[b.0] = true;
        let mut dead_nodes = vec![false; self.nodes.len()];
        dead_nodes[node.0] = true;
        let mut dead_edges = vec![false; self.edges.len()];
        dead_edges[dead_edge.0] = true;
        self.compact(&dead_links, &dead_nodes, &dead_edges);
    }

    /// Removes `node` and its entire subtree away from the root,
    /// including the edge connecting it to its parent.
    ///
    /// The parent keeps its remaining links; if the subtree was the
    /// parent's only child, the parent keeps a self-looped link and may
    /// end up as the node of a single-node tree.
    ///
    /// # Panics
    /// Panics if `node` is the current root node.
    pub fn delete_subtree(&mut self, node: NodeIndex) {
        assert!(
            !self.is_root(node),
            "cannot delete the subtree containing the root"
        );

        let entry = self.nodes[node.0].link;
        let partner = self.links[entry.0].outer;

        let mut dead_links = vec![false; self.links.len()];
        let mut dead_nodes = vec![false; self.nodes.len()];
        let mut dead_edges = vec![false; self.edges.len()];
        dead_edges[self.links[entry.0].edge.0] = true;

        // mark everything at and below `node`
        let mut stack = vec![entry];
        while let Some(top) = stack.pop() {
            dead_nodes[self.links[top.0].node.0] = true;
            dead_links[top.0] = true;
            let mut cur = self.links[top.0].next;
            while cur != top {
                dead_links[cur.0] = true;
                dead_edges[self.links[cur.0].edge.0] = true;
                stack.push(self.links[cur.0].outer);
                cur = self.links[cur.0].next;
            }
        }

        if self.links[partner.0].next == partner {
            // the subtree was the parent's only child; the parent keeps
            // its lone link as a single-node placeholder
            self.links[partner.0].outer = partner;
        } else {
            dead_links[partner.0] = true;
            let partner_next = self.links[partner.0].next;
            let pred = self.cycle_predecessor(partner);
            self.links[pred.0].next = partner_next;
            let parent = self.links[partner.0].node;
            if self.nodes[parent.0].link == partner {
                self.nodes[parent.0].link = partner_next;
                if self.root_link == partner {
                    self.root_link = partner_next;
                }
            }
        }

        self.compact(&dead_links, &dead_nodes, &dead_edges);
    }
}

// ============================================================================
// Internals
// ============================================================================
impl Tree {
    /// The link whose `next` is `link`, found by walking the chain once
    /// around.
    fn cycle_predecessor(&self, link: LinkIndex) -> LinkIndex {
        let mut cur = link;
        while self.links[cur.0].next != link {
            cur = self.links[cur.0].next;
        }
        cur
    }

    /// Mutable payloads of two distinct edges at once.
    fn edge_data_pair_mut(
        &mut self,
        first: EdgeIndex,
        second: EdgeIndex,
    ) -> (&mut EdgeData, &mut EdgeData) {
        debug_assert_ne!(first.0, second.0);
        if first.0 < second.0 {
            let (head, tail) = self.edges.split_at_mut(second.0);
            (&mut head[first.0].data, &mut tail[0].data)
        } else {
            let (head, tail) = self.edges.split_at_mut(first.0);
            (&mut tail[0].data, &mut head[second.0].data)
        }
    }

    /// Drops all elements marked dead and renumbers every index so the
    /// three arenas are dense again.
    fn compact(&mut self, dead_links: &[bool], dead_nodes: &[bool], dead_edges: &[bool]) {
        let link_map = survivor_prefix(dead_links);
        let node_map = survivor_prefix(dead_nodes);
        let edge_map = survivor_prefix(dead_edges);

        self.links.retain(|link| !dead_links[link.index.0]);
        self.nodes.retain(|node| !dead_nodes[node.index.0]);
        self.edges.retain(|edge| !dead_edges[edge.index.0]);

        for link in &mut self.links {
            link.index = LinkIndex(link_map[link.index.0]);
            link.next = LinkIndex(link_map[link.next.0]);
            link.outer = LinkIndex(link_map[link.outer.0]);
            link.node = NodeIndex(node_map[link.node.0]);
            link.edge = EdgeIndex(edge_map[link.edge.0]);
        }
        for node in &mut self.nodes {
            node.index = NodeIndex(node_map[node.index.0]);
            node.link = LinkIndex(link_map[node.link.0]);
        }
        for edge in &mut self.edges {
            edge.index = EdgeIndex(edge_map[edge.index.0]);
            edge.primary = LinkIndex(link_map[edge.primary.0]);
            edge.secondary = LinkIndex(link_map[edge.secondary.0]);
        }
        self.root_link = LinkIndex(link_map[self.root_link.0]);
    }
}

/// Maps each old index to its position after the dead entries are gone.
/// Entries for dead indices are meaningless but in range.
fn survivor_prefix(dead: &[bool]) -> Vec<usize> {
    let mut map = Vec::with_capacity(dead.len());
    let mut next = 0;
    for &is_dead in dead {
        map.push(next);
        if !is_dead {
            next += 1;
        }
    }
    map
}
