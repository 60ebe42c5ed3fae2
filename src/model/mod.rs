//! Data model for rooted phylogenetic trees.
//!
//! # Tree representation
//! Trees are represented by [Tree], which uses the arena pattern to store
//! [Vertex] nodes referenced by [VertexIndex]. Vertices may have any number
//! of children, labels are stored directly in the vertices.
//!
//! # Operations
//! - [Tree::root_with_outgroup] - place the root on the outgroup edge
//! - [Tree::ladderize] - order children by subtree size
//! - [Tree::leaf_labels] - leaf order, e.g. for plotting next to the tree

pub mod ladderize;
pub mod reroot;
pub mod tree;
pub mod tree_error;
pub mod vertex;

pub use ladderize::LadderizeOrder;
pub use tree::{Tree, VertexIndex};
pub use tree_error::TreeError;
pub use vertex::{BranchLength, Vertex};
