//! Vertex module for phylogenetic tree representation.

use crate::model::tree::VertexIndex;
use std::fmt;
use std::ops::Deref;

// =#========================================================================#=
// VERTEX
// =#========================================================================#=
/// Represents a vertex (node) in a phylogenetic [Tree](crate::model::Tree).
///
/// A vertex can be:
/// - **Root**: has no parent; the root branch length is kept but rarely set
/// - **Internal**: has a parent and at least one child; its label, if any,
///   is usually a support value such as `0.987` written by FastTree
/// - **Leaf**: has a parent (unless it is the only vertex) and no children;
///   its label is the taxon name
///
/// # Invariants
/// - `index` is the position of this vertex in the tree arena
/// - `branch_length` is finite (enforced by [BranchLength]); might not be set
/// - `children` are kept in Newick (left-to-right) order
#[derive(PartialEq, Debug, Clone)]
pub struct Vertex {
    /// Index of this vertex in the tree arena
    index: VertexIndex,
    /// Index of the parent vertex, `None` for the root
    parent: Option<VertexIndex>,
    /// Indices of child vertices, in order
    children: Vec<VertexIndex>,
    /// Distance to parent vertex
    branch_length: Option<BranchLength>,
    /// Taxon name (leaves) or support value/clade name (internal vertices)
    label: Option<String>,
}

impl Vertex {
    /// Creates a new vertex without parent and children.
    ///
    /// # Arguments
    /// * `index` - The unique index of this vertex in the tree (arena)
    /// * `branch_length` - Distance to parent vertex
    /// * `label` - Optional label
    pub fn new(index: VertexIndex, branch_length: Option<BranchLength>, label: Option<String>) -> Self {
        Vertex {
            index,
            parent: None,
            children: Vec::new(),
            branch_length,
            label,
        }
    }

    /// Returns the index of this vertex.
    pub fn index(&self) -> VertexIndex {
        self.index
    }

    pub(crate) fn set_index(&mut self, index: VertexIndex) {
        self.index = index;
    }

    /// Returns whether this vertex has a [BranchLength].
    pub fn has_branch_length(&self) -> bool {
        self.branch_length.is_some()
    }

    /// Returns the branch length to the parent, if set.
    pub fn branch_length(&self) -> Option<BranchLength> {
        self.branch_length
    }

    /// Sets (or clears) the branch length to the parent.
    pub fn set_branch_length(&mut self, branch_length: Option<BranchLength>) {
        self.branch_length = branch_length;
    }

    /// Returns the label of this vertex, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns `true` if this vertex is a leaf.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `true` if this vertex is the root.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Returns `true` if this vertex is neither root nor leaf.
    pub fn is_internal(&self) -> bool {
        !self.is_root() && !self.is_leaf()
    }

    /// Returns the indices of the children, in order (empty for leaves).
    pub fn children(&self) -> &[VertexIndex] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<VertexIndex> {
        &mut self.children
    }

    /// Returns the index of the parent, or `None` for the root.
    pub fn parent(&self) -> Option<VertexIndex> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<VertexIndex>) {
        self.parent = parent;
    }
}

// =#========================================================================#=
// BRANCH LENGTH
// =#========================================================================#=
/// Branch length in a phylogenetic tree, enforced finite.
///
/// Represents the evolutionary distance between a vertex and its parent.
/// The value is guaranteed to be finite. It may be negative: distance-based
/// inference methods such as neighbour joining can estimate small negative
/// edges, and those are kept as they are.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct BranchLength(f64);

impl BranchLength {
    /// Zero-length branch, as given to the outgroup edge after rerooting.
    pub const ZERO: BranchLength = BranchLength(0.0);

    /// Creates a new branch length.
    ///
    /// # Panics
    /// Panics if `length` is not finite.
    pub fn new(length: f64) -> Self {
        assert!(length.is_finite(), "Branch length must be finite, got {length}");
        BranchLength(length)
    }

    /// Returns whether this length is negative.
    pub fn is_negative(&self) -> bool {
        self.0 < 0.0
    }

    /// Creates a new branch length, returning `None` for non-finite values.
    pub fn try_new(length: f64) -> Option<Self> {
        length.is_finite().then_some(BranchLength(length))
    }
}

impl Deref for BranchLength {
    type Target = f64;
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl std::ops::Add for BranchLength {
    type Output = BranchLength;
    fn add(self, other: BranchLength) -> BranchLength {
        BranchLength(self.0 + other.0)
    }
}

impl fmt::Display for BranchLength {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
