//! Data model for rooted trees with an explicit link structure.
//!
//! # Tree representation
//! Trees are represented by [Tree], which owns three arenas: [Link]s,
//! [Node]s and [Edge]s. Links encode the whole topology: the links of a
//! node form a circular `next` chain, and each link crosses its edge via
//! `outer`. Nodes and edges carry the payloads, [NodeData] and
//! [EdgeData]. All cross references are plain indices, so trees clone
//! into fully independent copies.
//!
//! | Concern | Where |
//! |---------|-------|
//! | arena access, queries | [tree] |
//! | preorder, level-order, path iteration | [traverse] |
//! | reroot, insert, delete | [manipulate] |
//! | invariant checking | [validate] |
//!
//! # Root handling
//! One link is designated the root link. Every edge knows which of its
//! ends is rootward (primary) and which is leafward (secondary), and
//! every node's primary link points toward the root. Rerooting flips this
//! bookkeeping along one path; the undirected structure never changes.

pub mod edge;
pub mod link;
pub mod manipulate;
pub mod node;
pub mod traverse;
pub mod tree;
pub mod validate;

// Tree and arena elements
pub use edge::Edge;
pub use edge::EdgeData;
pub use edge::EdgeIndex;
pub use link::Link;
pub use link::LinkIndex;
pub use node::Node;
pub use node::NodeData;
pub use node::NodeIndex;
pub use tree::Tree;
// Traversal
pub use traverse::LevelorderIter;
pub use traverse::PathIter;
pub use traverse::PreorderIter;
pub use traverse::TraversalStep;
// Validation
pub use validate::validate_topology;
