//! Provides [Edge] and its payload [EdgeData].

use crate::model::LinkIndex;

/// Index of an [Edge] in a tree arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeIndex(pub usize);

// =$========================================================================$=
// EDGE
// =$========================================================================$=
/// An edge of a tree: a payload plus references to its two links.
///
/// The *primary* link sits at the endpoint closer to the current root, the
/// *secondary* link at the endpoint farther away. The secondary link is
/// always the primary link of its node, so edge directions and node entry
/// points stay consistent as the root moves.
#[derive(Debug, Clone)]
pub struct Edge {
    /// Own index in the tree's edge arena
    pub(crate) index: EdgeIndex,

    /// Link at the rootward endpoint
    pub(crate) primary: LinkIndex,

    /// Link at the leafward endpoint
    pub(crate) secondary: LinkIndex,

    /// Payload
    pub(crate) data: EdgeData,
}

impl Edge {
    /// Own index in the tree's edge arena.
    pub fn index(&self) -> EdgeIndex {
        self.index
    }

    /// The link at the endpoint closer to the current root.
    pub fn primary_link(&self) -> LinkIndex {
        self.primary
    }

    /// The link at the endpoint farther from the current root.
    pub fn secondary_link(&self) -> LinkIndex {
        self.secondary
    }

    pub fn data(&self) -> &EdgeData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut EdgeData {
        &mut self.data
    }
}

// =$========================================================================$=
// EDGE DATA
// =$========================================================================$=
/// Payload of an [Edge].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeData {
    /// Branch length; `0.0` when the source text gave none
    pub branch_length: f64,
}

impl EdgeData {
    /// Creates a payload with the given branch length.
    pub fn with_branch_length(branch_length: f64) -> Self {
        EdgeData { branch_length }
    }
}
