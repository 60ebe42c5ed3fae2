//! Tree module for phylogenetic tree representation.
//!
//! Provides [Tree], an arena of [Vertex] values referenced by [VertexIndex],
//! together with pre- and post-order iterators. Rerooting and ladderizing
//! live in their own modules ([crate::model::reroot], [crate::model::ladderize]).

use crate::model::vertex::{BranchLength, Vertex};

/// Index of a vertex in a tree (arena).
pub type VertexIndex = usize;

/// *During construction only*, index for unset root.
const NO_ROOT_SET_INDEX: VertexIndex = usize::MAX;

// =#========================================================================#=
// TREE
// =#========================================================================#=
/// A rooted phylogenetic tree represented using the arena pattern on [Vertex].
///
/// Vertices are stored in a contiguous vector and referenced by [VertexIndex].
/// Unlike strictly binary models, a vertex may have any number of children:
/// FastTree writes its unrooted result with a trifurcating root.
///
/// # Structure
/// - All vertices are stored in the arena; the index of the root is maintained.
/// - No assumption on order of indices is maintained.
/// - Leaves carry taxon labels, internal vertices optional labels (support values).
/// - Branch lengths are optional, but if provided must be finite.
///
/// # Construction
/// Bottom-up: add leaves, then internal vertices with their children, then
/// mark the outermost vertex as root. Test validity with [Tree::is_valid].
///
/// # Example
/// ```
/// use phyloprep::model::{BranchLength, Tree};
///
/// // ((A:0.2,B:0.2):0.1,C:0.3,D:0.4);
/// let mut tree = Tree::new();
/// let a = tree.add_leaf(Some(BranchLength::new(0.2)), "A".to_string());
/// let b = tree.add_leaf(Some(BranchLength::new(0.2)), "B".to_string());
/// let ab = tree.add_internal_vertex(vec![a, b], Some(BranchLength::new(0.1)), None);
/// let c = tree.add_leaf(Some(BranchLength::new(0.3)), "C".to_string());
/// let d = tree.add_leaf(Some(BranchLength::new(0.4)), "D".to_string());
/// let root = tree.add_internal_vertex(vec![ab, c, d], None, None);
/// tree.set_root(root);
///
/// assert!(tree.is_valid());
/// assert_eq!(tree.num_leaves(), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Tree {
    /// Vertices of this tree (arena pattern)
    vertices: Vec<Vertex>,

    /// Index of the root of this tree
    root_index: VertexIndex,
}

// ============================================================================
// New, Construction (pub)
// ============================================================================
impl Tree {
    /// Creates a new, empty tree.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new, empty tree with room for a binary tree on `num_leaves` leaves.
    pub fn with_capacity(num_leaves: usize) -> Self {
        Tree {
            vertices: Vec::with_capacity((2 * num_leaves).saturating_sub(1)),
            root_index: NO_ROOT_SET_INDEX,
        }
    }

    /// Adds a leaf to the tree, assigning a unique index, which gets returned.
    ///
    /// # Arguments
    /// * `branch_length` - Length of incoming branch, i.e. distance to parent
    /// * `label` - Taxon name of this leaf
    pub fn add_leaf(&mut self, branch_length: Option<BranchLength>, label: String) -> VertexIndex {
        let index = self.vertices.len();
        self.vertices.push(Vertex::new(index, branch_length, Some(label)));
        index
    }

    /// Adds a leaf without label, as in `(,(,A));`, and returns its index.
    pub fn add_unlabelled_leaf(&mut self, branch_length: Option<BranchLength>) -> VertexIndex {
        self.push_detached(branch_length, None)
    }

    /// Adds a vertex with the given children, assigning a unique index, which gets returned.
    ///
    /// # Arguments
    /// * `children` - Indices of previously added vertices, in order
    /// * `branch_length` - Length of incoming branch, i.e. distance to parent
    /// * `label` - Optional label, e.g. a support value
    pub fn add_internal_vertex(
        &mut self,
        children: Vec<VertexIndex>,
        branch_length: Option<BranchLength>,
        label: Option<String>,
    ) -> VertexIndex {
        let index = self.vertices.len();
        for &child in &children {
            self[child].set_parent(Some(index));
        }
        let mut vertex = Vertex::new(index, branch_length, label);
        *vertex.children_mut() = children;
        self.vertices.push(vertex);
        index
    }

    /// Marks the vertex at `index` as root of this tree.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds or the vertex already has a parent.
    pub fn set_root(&mut self, index: VertexIndex) {
        assert!(self[index].parent().is_none(), "Root vertex {index} must not have a parent");
        self.root_index = index;
    }

    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - Root index is set, within bounds and the root has no parent
    /// - All vertex indices match their position in the arena
    /// - All child indices are valid and point back to their parent
    /// - All parent indices are valid and include this vertex as a child
    /// - Every vertex is reachable from the root (no detached vertices)
    ///
    /// # Returns
    /// `true` if tree is valid, `false` otherwise
    pub fn is_valid(&self) -> bool {
        if !self.is_root_set() || self.root_index >= self.vertices.len() {
            return false;
        }
        if self.vertices[self.root_index].parent().is_some() {
            return false;
        }

        for (index, vertex) in self.vertices.iter().enumerate() {
            if vertex.index() != index {
                return false;
            }

            // Children point back to this vertex
            for &child in vertex.children() {
                if child >= self.vertices.len() || self.vertices[child].parent() != Some(index) {
                    return false;
                }
            }

            // Parent lists this vertex as child; only the root has no parent
            match vertex.parent() {
                Some(parent) => {
                    if parent >= self.vertices.len() || !self.vertices[parent].children().contains(&index) {
                        return false;
                    }
                }
                None => {
                    if index != self.root_index {
                        return false;
                    }
                }
            }
        }

        // Every vertex is reachable exactly once
        self.pre_order_iter().count() == self.vertices.len()
    }
}

// ============================================================================
// Getters / Accessors (pub)
// ============================================================================
impl Tree {
    /// Returns whether root of tree has been set.
    pub fn is_root_set(&self) -> bool {
        self.root_index != NO_ROOT_SET_INDEX
    }

    /// Returns a reference to the root vertex.
    ///
    /// # Panics
    /// Panics if the root hasn't been set and thus tree hasn't been fully constructed yet.
    pub fn root(&self) -> &Vertex {
        &self[self.root_index]
    }

    /// Returns the index of the root vertex.
    pub fn root_index(&self) -> VertexIndex {
        self.root_index
    }

    /// Returns a reference to the vertex at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn vertex(&self, index: VertexIndex) -> &Vertex {
        &self[index]
    }

    /// Returns the number of leaves in this tree.
    pub fn num_leaves(&self) -> usize {
        self.vertices.iter().filter(|v| v.is_leaf()).count()
    }

    /// Returns the number of internal (non-root, non-leaf) vertices in this tree.
    pub fn num_internal(&self) -> usize {
        self.vertices.iter().filter(|v| v.is_internal()).count()
    }

    /// Returns the number of vertices in this tree.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the sum of all branch lengths in the tree (unset lengths count as 0).
    pub fn total_branch_length(&self) -> f64 {
        self.vertices.iter().filter_map(|v| v.branch_length()).map(|bl| *bl).sum()
    }

    /// Checks if all non-root vertices have branch lengths set.
    pub fn vertices_have_branch_lengths(&self) -> bool {
        self.vertices.iter().all(|v| v.is_root() || v.has_branch_length())
    }

    /// Returns the indices of all leaves labelled `label`.
    pub fn find_leaves(&self, label: &str) -> Vec<VertexIndex> {
        self.vertices
            .iter()
            .filter(|v| v.is_leaf() && v.label() == Some(label))
            .map(|v| v.index())
            .collect()
    }

    /// Returns the leaf labels in the order they appear in the Newick string
    /// (left to right), e.g. to order strains next to a drawn tree.
    /// Unlabelled leaves yield an empty string.
    ///
    /// # Example
    /// ```
    /// let tree = phyloprep::parse_newick_str("((B,C),A,(D,(E,F)));").unwrap();
    /// assert_eq!(tree.leaf_labels(), vec!["B", "C", "A", "D", "E", "F"]);
    /// ```
    pub fn leaf_labels(&self) -> Vec<&str> {
        self.pre_order_iter()
            .filter(|v| v.is_leaf())
            .map(|v| v.label().unwrap_or(""))
            .collect()
    }

    /// Returns, for every vertex index, the number of leaves in the subtree below it
    /// (a leaf counts itself).
    pub fn leaf_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.vertices.len()];
        for vertex in self.post_order_iter() {
            counts[vertex.index()] = if vertex.is_leaf() {
                1
            } else {
                vertex.children().iter().map(|&c| counts[c]).sum()
            };
        }
        counts
    }

    /// Returns the indices on the path from the root down to `index`, both included.
    pub fn path_from_root(&self, index: VertexIndex) -> Vec<VertexIndex> {
        let mut path = vec![index];
        let mut current = index;
        while let Some(parent) = self[current].parent() {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        path
    }
}

// ============================================================================
// Restructuring (crate)
// ============================================================================
impl Tree {
    /// Appends a detached vertex and returns its index.
    pub(crate) fn push_detached(&mut self, branch_length: Option<BranchLength>, label: Option<String>) -> VertexIndex {
        let index = self.vertices.len();
        self.vertices.push(Vertex::new(index, branch_length, label));
        index
    }

    /// Detaches `child` from `parent`, returning its former position among the children.
    pub(crate) fn detach_child(&mut self, parent: VertexIndex, child: VertexIndex) -> Option<usize> {
        let position = self[parent].children().iter().position(|&c| c == child)?;
        self[parent].children_mut().remove(position);
        self[child].set_parent(None);
        Some(position)
    }

    /// Inserts `child` as the first child of `parent`.
    pub(crate) fn prepend_child(&mut self, parent: VertexIndex, child: VertexIndex) {
        self[parent].children_mut().insert(0, child);
        self[child].set_parent(Some(parent));
    }

    /// Replaces the children order of `parent`, which must be a permutation of the current one.
    pub(crate) fn reorder_children(&mut self, parent: VertexIndex, children: Vec<VertexIndex>) {
        debug_assert_eq!(children.len(), self[parent].children().len());
        *self[parent].children_mut() = children;
    }

    /// Sets a new root and rebuilds the arena with the vertices reachable from it,
    /// renumbered in pre-order. Detached vertices are dropped.
    pub(crate) fn rebuild_from_root(&mut self, root: VertexIndex) {
        let mut new_index = vec![NO_ROOT_SET_INDEX; self.vertices.len()];
        let mut order = Vec::with_capacity(self.vertices.len());
        let mut stack = vec![root];
        while let Some(index) = stack.pop() {
            new_index[index] = order.len();
            order.push(index);
            stack.extend(self.vertices[index].children().iter().rev());
        }

        let mut old = std::mem::take(&mut self.vertices);
        self.vertices = order
            .into_iter()
            .map(|index| {
                let mut vertex = std::mem::replace(&mut old[index], Vertex::new(index, None, None));
                vertex.set_index(new_index[index]);
                let parent = if index == root { None } else { vertex.parent().map(|p| new_index[p]) };
                vertex.set_parent(parent);
                for child in vertex.children_mut().iter_mut() {
                    *child = new_index[*child];
                }
                vertex
            })
            .collect();
        self.root_index = 0;
    }
}

impl std::ops::Index<VertexIndex> for Tree {
    type Output = Vertex;

    fn index(&self, index: VertexIndex) -> &Self::Output {
        &self.vertices[index]
    }
}

impl std::ops::IndexMut<VertexIndex> for Tree {
    fn index_mut(&mut self, index: VertexIndex) -> &mut Self::Output {
        &mut self.vertices[index]
    }
}

// =#========================================================================#=
// ITERATORS
// =#========================================================================#=
impl Tree {
    /// Returns an iterator over the tree in post-order (children before parents).
    ///
    /// Useful for aggregating data from leaves upward, such as leaf counts.
    pub fn post_order_iter(&self) -> PostOrderIter<'_> {
        PostOrderIter::new(self)
    }

    /// Returns an iterator over the tree in pre-order (parents before children),
    /// visiting children left to right.
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self)
    }
}

/// Iterator for post-order traversal (children before parents).
///
/// Uses a stack instead of recursion, so deep caterpillar trees are fine.
pub struct PostOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<(VertexIndex, bool)>, // (index, children_visited)
}

impl<'a> PostOrderIter<'a> {
    fn new(tree: &'a Tree) -> Self {
        let mut stack = Vec::new();
        if tree.is_root_set() {
            stack.push((tree.root_index, false));
        }
        PostOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PostOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            let vertex = &self.tree[index];

            if children_visited || vertex.is_leaf() {
                return Some(vertex);
            }

            self.stack.push((index, true));
            // Push children in reverse, so leftmost is processed first
            for &child in vertex.children().iter().rev() {
                self.stack.push((child, false));
            }
        }
        None
    }
}

/// Iterator for pre-order traversal (parents before children).
pub struct PreOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<VertexIndex>,
}

impl<'a> PreOrderIter<'a> {
    fn new(tree: &'a Tree) -> Self {
        let mut stack = Vec::new();
        if tree.is_root_set() {
            stack.push(tree.root_index);
        }
        PreOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let vertex = &self.tree[index];
        self.stack.extend(vertex.children().iter().rev());
        Some(vertex)
    }
}
