//! Newick string and file writing for [Tree]s.

use crate::model::tree::{Tree, VertexIndex};
use crate::model::vertex::BranchLength;
use crate::newick::defs::BUFFER_CHARS;
use crate::parser::utils::escape_label;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Writes the tree to a file as a single Newick string followed by a newline.
///
/// An existing file is overwritten.
///
/// # Errors
/// Returns an I/O error if the file cannot be created or writing fails.
pub fn write_tree<P: AsRef<Path>>(path: P, tree: &Tree) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(to_newick(tree).as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()
}

/// Returns the Newick representation of this tree with closing semicolon.
///
/// Labels are escaped if necessary ([escape_label]), internal labels such as
/// support values are written right after the closing parenthesis. Branch
/// lengths use the shortest decimal form that reads back to the same value
/// (`0`, `0.02`), not the fixed five decimals Bio.Phylo writes (`0.00000`).
/// The branch length of the root, if any, is not written.
///
/// # Example
/// ```
/// use phyloprep::model::{BranchLength, Tree};
/// use phyloprep::newick::to_newick;
///
/// let mut tree = Tree::new();
/// let a = tree.add_leaf(Some(BranchLength::new(1.0)), "A".to_string());
/// let b = tree.add_leaf(Some(BranchLength::new(2.5)), "B/Hong Kong".to_string());
/// let root = tree.add_internal_vertex(vec![a, b], None, None);
/// tree.set_root(root);
///
/// assert_eq!(to_newick(&tree), "(A:1,'B/Hong Kong':2.5);");
/// ```
pub fn to_newick(tree: &Tree) -> String {
    // Helper for adding branch lengths
    fn build_newick_branch_length(newick: &mut String, branch_length: Option<BranchLength>) {
        if let Some(branch_length) = branch_length {
            newick.push(':');
            newick.push_str(&branch_length.to_string());
        }
    }

    // Recursive helper for building the Newick string
    fn build_newick(tree: &Tree, newick: &mut String, index: VertexIndex) {
        let vertex = &tree[index];

        if !vertex.is_leaf() {
            newick.push('(');
            for (i, &child) in vertex.children().iter().enumerate() {
                if i > 0 {
                    newick.push(',');
                }
                build_newick(tree, newick, child);
            }
            newick.push(')');
        }

        if let Some(label) = vertex.label() {
            newick.push_str(&escape_label(label));
        }
        if !vertex.is_root() {
            build_newick_branch_length(newick, vertex.branch_length());
        }
    }

    if !tree.is_root_set() {
        return String::from(";");
    }

    let mut newick = String::with_capacity(estimate_newick_len(tree));
    build_newick(tree, &mut newick, tree.root_index());
    newick.push(';');
    newick
}

/// Estimates the number of characters of the Newick string of the tree,
/// used to pre-allocate the output buffer.
pub(crate) fn estimate_newick_len(tree: &Tree) -> usize {
    // Each internal vertex: "()" plus separating commas
    const INTERNAL_VERTEX_CHARS: usize = 3;
    // Branch lengths: ~20 chars each (e.g., ":0.009529961339106089")
    const BRANCH_LENGTH_CHARS: usize = 20;

    let structure_capacity = (tree.num_internal() + 1) * INTERNAL_VERTEX_CHARS;
    let label_capacity: usize = tree
        .pre_order_iter()
        .filter_map(|v| v.label())
        .map(|label| label.len() + 2)
        .sum();
    let branch_length_capacity = tree.num_vertices() * BRANCH_LENGTH_CHARS;

    structure_capacity + label_capacity + branch_length_capacity + BUFFER_CHARS
}
