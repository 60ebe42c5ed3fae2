//! Ladderizing: ordering children by subtree size.

use crate::model::tree::Tree;
use std::cmp::Reverse;

/// Direction in which [Tree::ladderize] orders children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LadderizeOrder {
    /// Smallest subtrees first (left), largest last.
    #[default]
    Ascending,
    /// Largest subtrees first.
    Descending,
}

impl Tree {
    /// Reorders the children of every vertex by the number of leaves below them.
    ///
    /// The sort is stable: children with equally many leaves keep their
    /// relative order. Only the order of children changes, vertex indices,
    /// labels and branch lengths are untouched.
    ///
    /// # Example
    /// ```
    /// use phyloprep::model::LadderizeOrder;
    /// use phyloprep::newick::to_newick;
    ///
    /// let mut tree = phyloprep::parse_newick_str("((A,(B,C)),D);").unwrap();
    /// tree.ladderize(LadderizeOrder::Ascending);
    /// assert_eq!(to_newick(&tree), "(D,(A,(B,C)));");
    /// ```
    pub fn ladderize(&mut self, order: LadderizeOrder) {
        let counts = self.leaf_counts();
        let internal: Vec<_> = self
            .pre_order_iter()
            .filter(|v| !v.is_leaf())
            .map(|v| v.index())
            .collect();

        for index in internal {
            let mut children = self[index].children().to_vec();
            match order {
                LadderizeOrder::Ascending => children.sort_by_key(|&c| counts[c]),
                LadderizeOrder::Descending => children.sort_by_key(|&c| Reverse(counts[c])),
            }
            self.reorder_children(index, children);
        }
    }

    /// Returns whether the children of every vertex are ordered by leaf count
    /// in the given direction.
    pub fn is_ladderized(&self, order: LadderizeOrder) -> bool {
        let counts = self.leaf_counts();
        self.pre_order_iter().all(|v| {
            v.children().windows(2).all(|pair| match order {
                LadderizeOrder::Ascending => counts[pair[0]] <= counts[pair[1]],
                LadderizeOrder::Descending => counts[pair[0]] >= counts[pair[1]],
            })
        })
    }
}
