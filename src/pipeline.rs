//! The linear preparation pipeline: adjust alignment, infer tree, post-process tree.
//!
//! Each stage reads the file the previous stage wrote. [PipelineConfig]
//! holds every path and parameter; its defaults reproduce the fixed setup of
//! the yang2022 H3N2 haemagglutinin dataset.

use crate::alignment::{self, AdjustmentRule, AlignmentSummary};
use crate::error::{PipelineError, Result};
use crate::inference::InferenceCommand;
use crate::model::{LadderizeOrder, Tree};
use crate::newick;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Default input alignment.
pub const DEFAULT_INPUT: &str = "yang2022/yang2022_HA_alignment.fasta";
/// Default adjusted alignment handed to tree inference.
pub const DEFAULT_ADJUSTED: &str = "yang2022/yang2022_HA_alignment_std.fasta";
/// Default file receiving the tree as inferred.
pub const DEFAULT_RAW_TREE: &str = "yang2022/yang2022_tree_raw.nwk";
/// Default file receiving the rerooted, ladderized tree.
pub const DEFAULT_OUTPUT: &str = "yang2022/yang2022_tree.nwk";
/// Default outgroup leaf.
pub const DEFAULT_OUTGROUP: &str = "A/HongKong/1968";

// =#========================================================================#=
// CONFIG
// =#========================================================================#=
/// Paths and parameters of a pipeline run.
///
/// # Example
/// ```
/// use phyloprep::model::LadderizeOrder;
/// use phyloprep::pipeline::PipelineConfig;
///
/// let config = PipelineConfig::default()
///     .with_output("tree.nwk")
///     .with_outgroup("A/Bilthoven/16190/1968")
///     .with_ladderize_order(LadderizeOrder::Descending);
/// assert_eq!(config.rule.position, 23);
/// assert_eq!(config.inference.program, "fasttree");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Alignment to adjust
    pub input: PathBuf,
    /// Adjusted alignment, input of tree inference
    pub adjusted: PathBuf,
    /// Tree as written by the inference program
    pub raw_tree: PathBuf,
    /// Final rerooted and ladderized tree
    pub output: PathBuf,
    /// Gap insertion applied to the alignment
    pub rule: AdjustmentRule,
    /// Leaf the final tree is rooted at
    pub outgroup: String,
    /// Tree inference program
    pub inference: InferenceCommand,
    /// Child order of the final tree
    pub ladderize_order: LadderizeOrder,
    /// Optional file receiving the leaf labels of the final tree, one per line
    pub strain_order: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            adjusted: PathBuf::from(DEFAULT_ADJUSTED),
            raw_tree: PathBuf::from(DEFAULT_RAW_TREE),
            output: PathBuf::from(DEFAULT_OUTPUT),
            rule: AdjustmentRule::default(),
            outgroup: DEFAULT_OUTGROUP.to_string(),
            inference: InferenceCommand::default(),
            ladderize_order: LadderizeOrder::default(),
            strain_order: None,
        }
    }
}

impl PipelineConfig {
    /// Sets the alignment to adjust.
    pub fn with_input(mut self, path: impl Into<PathBuf>) -> Self {
        self.input = path.into();
        self
    }

    /// Sets where the adjusted alignment is written.
    pub fn with_adjusted(mut self, path: impl Into<PathBuf>) -> Self {
        self.adjusted = path.into();
        self
    }

    /// Sets where the inferred tree is written.
    pub fn with_raw_tree(mut self, path: impl Into<PathBuf>) -> Self {
        self.raw_tree = path.into();
        self
    }

    /// Sets where the final tree is written.
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = path.into();
        self
    }

    /// Sets the gap insertion rule.
    pub fn with_rule(mut self, rule: AdjustmentRule) -> Self {
        self.rule = rule;
        self
    }

    /// Sets the outgroup leaf label.
    pub fn with_outgroup(mut self, outgroup: impl Into<String>) -> Self {
        self.outgroup = outgroup.into();
        self
    }

    /// Sets the tree inference command.
    pub fn with_inference(mut self, inference: InferenceCommand) -> Self {
        self.inference = inference;
        self
    }

    /// Sets the ladderize direction.
    pub fn with_ladderize_order(mut self, order: LadderizeOrder) -> Self {
        self.ladderize_order = order;
        self
    }

    /// Requests the leaf order of the final tree to be written to `path`.
    pub fn with_strain_order(mut self, path: impl Into<PathBuf>) -> Self {
        self.strain_order = Some(path.into());
        self
    }
}

// =#========================================================================#=
// RUN
// =#========================================================================#=
/// Outcome of a successful pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineSummary {
    /// Result of the alignment adjustment
    pub alignment: AlignmentSummary,
    /// The final tree, as written
    pub tree: Tree,
}

/// Runs all three stages with the given configuration.
///
/// # Errors
/// The first failing stage aborts the run, see [PipelineError].
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineSummary> {
    info!(
        "Adjusting alignment {} -> {}",
        config.input.display(),
        config.adjusted.display()
    );
    let alignment = alignment::adjust_alignment_file(&config.input, &config.adjusted, &config.rule)?;
    info!(
        "Inserted '{}' at column {} into {} of {} records",
        char::from(config.rule.gap),
        config.rule.position,
        alignment.num_adjusted,
        alignment.num_records
    );

    config.inference.run(&config.adjusted, &config.raw_tree)?;

    let tree = postprocess_tree(
        &config.raw_tree,
        &config.output,
        &config.outgroup,
        config.ladderize_order,
    )?;

    if let Some(path) = &config.strain_order {
        write_strain_order(path, &tree)?;
        info!("Wrote strain order to {}", path.display());
    }

    Ok(PipelineSummary { alignment, tree })
}

/// Reads the tree in `raw_tree`, roots it at `outgroup`, ladderizes it and
/// writes it to `output`. Returns the final tree.
///
/// # Errors
/// * [PipelineError::Newick] if the file is not a single valid Newick tree
/// * [PipelineError::Tree] if the outgroup is missing or ambiguous
/// * [PipelineError::Io] if the output cannot be written
pub fn postprocess_tree<P, Q>(raw_tree: P, output: Q, outgroup: &str, order: LadderizeOrder) -> Result<Tree>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let raw_tree = raw_tree.as_ref();
    let output = output.as_ref();

    info!("Reading tree {}", raw_tree.display());
    let mut tree = newick::read_tree(raw_tree)?;
    log_tree_summary(&tree);
    if !tree.vertices_have_branch_lengths() {
        warn!("Tree {} lacks some branch lengths", raw_tree.display());
    }

    tree.root_with_outgroup(outgroup)?;
    tree.ladderize(order);
    debug!("Rooted at '{outgroup}' and ladderized ({order:?})");

    newick::write_tree(output, &tree).map_err(|e| PipelineError::io(output, e))?;
    info!("Wrote final tree to {}", output.display());
    Ok(tree)
}

/// Writes the leaf labels of `tree` from left to right, one per line.
pub fn write_strain_order<P: AsRef<Path>>(path: P, tree: &Tree) -> Result<()> {
    let path = path.as_ref();
    let mut contents = tree.leaf_labels().join("\n");
    contents.push('\n');
    fs::write(path, contents).map_err(|e| PipelineError::io(path, e))
}

fn log_tree_summary(tree: &Tree) {
    info!(
        "Tree has {} leaves, {} vertices, total branch length {:.6}",
        tree.num_leaves(),
        tree.num_vertices(),
        tree.total_branch_length()
    );
}
