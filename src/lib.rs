//! Phyloprep prepares a multiple sequence alignment for phylogenetic tree
//! inference and post-processes the inferred tree.
//!
//! The pipeline has three stages, each reading the file written by the previous one:
//! 1. [alignment]: insert a gap column into every FASTA record except one
//!    designated exception
//! 2. [inference]: run an external tree inference program (FastTree by
//!    default) on the adjusted alignment, capturing the Newick tree it prints
//! 3. tree post-processing: read the tree ([newick]), root it at an outgroup
//!    leaf and ladderize it ([model]), then write it back
//!
//! [pipeline::run_pipeline] runs all stages with a [pipeline::PipelineConfig].
//!
//! Tree model:
//! - [Tree] uses the arena pattern, no direct vertex references are stored,
//!   only vertex indices
//! - Vertices may have any number of children and an optional label
//!   (taxon name or support value)
//!
//! # Example
//!
//! Root and ladderize a tree given as Newick string:
//! ```
//! use phyloprep::model::LadderizeOrder;
//! use phyloprep::newick::to_newick;
//! use phyloprep::parse_newick_str;
//!
//! let mut tree = parse_newick_str("(B:0.2,(C:0.1,D:0.1)0.95:0.3,A/HongKong/1968:0.5);").unwrap();
//! tree.root_with_outgroup("A/HongKong/1968").unwrap();
//! tree.ladderize(LadderizeOrder::Ascending);
//! assert_eq!(to_newick(&tree), "(A/HongKong/1968:0,(B:0.2,(C:0.1,D:0.1)0.95:0.3):0.5);");
//! ```
//!
//! Run the whole pipeline on other files:
//! ```no_run
//! use phyloprep::pipeline::{run_pipeline, PipelineConfig};
//!
//! let config = PipelineConfig::default()
//!     .with_input("ha.fasta")
//!     .with_output("ha_tree.nwk")
//!     .with_strain_order("ha_strains.txt");
//! let summary = run_pipeline(&config)?;
//! println!("Final tree has {} leaves", summary.tree.num_leaves());
//! # Ok::<(), phyloprep::error::PipelineError>(())
//! ```

pub mod alignment;
pub mod error;
pub mod inference;
pub mod model;
pub mod newick;
pub mod parser;
pub mod pipeline;

pub use error::PipelineError;
pub use model::Tree;
pub use parser::ParsingError;

use std::path::Path;

// =#========================================================================#=
// QUICK API
// =#========================================================================#=
/// Parses a single Newick string, see [newick::parse_str].
pub fn parse_newick_str<S: AsRef<str>>(newick: S) -> Result<Tree, ParsingError> {
    newick::parse_str(newick)
}

/// Reads a Newick file holding exactly one tree, see [newick::read_tree].
pub fn read_newick_file<P: AsRef<Path>>(path: P) -> Result<Tree, ParsingError> {
    newick::read_tree(path)
}
