//! Rerooting a tree at an outgroup leaf.
//!
//! The inference tool returns an unrooted tree (printed with an arbitrary
//! trifurcating root). [Tree::root_with_outgroup] places the root on the
//! edge leading to the outgroup: a new root vertex gets the outgroup as one
//! child and the rest of the tree, re-oriented, as the other.

use crate::model::tree::{Tree, VertexIndex};
use crate::model::tree_error::TreeError;
use crate::model::vertex::BranchLength;
use log::debug;

impl Tree {
    /// Reroots this tree so that the leaf labelled `outgroup` becomes a direct
    /// child of a new root.
    ///
    /// Branch lengths are moved along with the re-oriented edges:
    /// - the outgroup edge gets length 0, its former length is carried by the
    ///   edge from the new root into the ingroup
    /// - each vertex on the former root-to-outgroup path takes over the length
    ///   of the edge below it on that path
    /// - if the former root is left with a single child, it is dissolved and
    ///   the two edges meeting there are merged
    ///
    /// Labels, including support values of internal vertices, stay with their
    /// vertices. Vertex indices are renumbered in pre-order afterwards.
    ///
    /// # Errors
    /// * [TreeError::OutgroupNotFound] if no leaf is labelled `outgroup`
    /// * [TreeError::AmbiguousOutgroup] if several leaves are
    /// * [TreeError::NoRoot] if the tree is still under construction
    ///
    /// # Example
    /// ```
    /// use phyloprep::newick::to_newick;
    ///
    /// let mut tree = phyloprep::parse_newick_str("(A:1,B:2,(C:3,D:4):5);").unwrap();
    /// tree.root_with_outgroup("C").unwrap();
    /// assert_eq!(to_newick(&tree), "(((A:1,B:2):5,D:4):3,C:0);");
    /// ```
    pub fn root_with_outgroup(&mut self, outgroup: &str) -> Result<(), TreeError> {
        if !self.is_root_set() {
            return Err(TreeError::NoRoot);
        }

        let leaves = self.find_leaves(outgroup);
        let outgroup_index = match leaves.as_slice() {
            [] => return Err(TreeError::OutgroupNotFound(outgroup.to_string())),
            [index] => *index,
            _ => {
                return Err(TreeError::AmbiguousOutgroup {
                    label: outgroup.to_string(),
                    count: leaves.len(),
                });
            }
        };

        if outgroup_index == self.root_index() {
            debug!("Outgroup '{outgroup}' is the root already, nothing to reroot");
            return Ok(());
        }

        self.root_at_leaf(outgroup_index);
        debug!("Rerooted tree at outgroup '{outgroup}'");
        Ok(())
    }

    /// Places a new root on the edge above `outgroup` (which must not be the root).
    fn root_at_leaf(&mut self, outgroup: VertexIndex) {
        let old_root = self.root_index();
        let path = self.path_from_root(outgroup); // [old_root, ..., outgroup]

        // Cut every edge of the path; the vertices are re-linked in reverse below
        for pair in path.windows(2) {
            self.detach_child(pair[0], pair[1]);
        }

        let new_root = self.push_detached(self[old_root].branch_length(), None);
        let mut carried = self[outgroup].branch_length();
        let outgroup_edge = carried.map(|_| BranchLength::ZERO);
        self[outgroup].set_branch_length(outgroup_edge);
        self.prepend_child(new_root, outgroup);

        // Walk up the former path, each vertex hangs below the one that was its child
        let mut new_parent = new_root;
        for &vertex in path[1..path.len() - 1].iter().rev() {
            let own = self[vertex].branch_length();
            self[vertex].set_branch_length(carried);
            carried = own;
            self.prepend_child(new_parent, vertex);
            new_parent = vertex;
        }

        // Former root: dissolve if it became unary, otherwise re-orient its edge
        match self[old_root].children().to_vec().as_slice() {
            [] => {}
            [ingroup] => {
                let ingroup = *ingroup;
                self.detach_child(old_root, ingroup);
                let merged = match (self[ingroup].branch_length(), carried) {
                    (Some(own), Some(extra)) => Some(own + extra),
                    (own, None) => own,
                    (None, extra) => extra,
                };
                self[ingroup].set_branch_length(merged);
                self.prepend_child(new_parent, ingroup);
            }
            _ => {
                self[old_root].set_branch_length(carried);
                self.prepend_child(new_parent, old_root);
            }
        }

        self.rebuild_from_root(new_root);
    }
}
