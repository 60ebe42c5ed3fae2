use clap::{Parser, ValueEnum};
use phyloprep::alignment::{AdjustmentRule, DEFAULT_EXCEPTION_ID, DEFAULT_GAP_POSITION};
use phyloprep::inference::{DEFAULT_PROGRAM, InferenceCommand};
use phyloprep::model::LadderizeOrder;
use phyloprep::pipeline::{
    DEFAULT_ADJUSTED, DEFAULT_INPUT, DEFAULT_OUTGROUP, DEFAULT_OUTPUT, DEFAULT_RAW_TREE, PipelineConfig,
};
use std::path::PathBuf;

/// Insert a gap column into an HA alignment, infer a tree with FastTree,
/// then root it at the outgroup and ladderize it.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to alignment file stored in FASTA format
    #[arg(short = 'i', long = "input", default_value = DEFAULT_INPUT)]
    pub input: PathBuf,
    /// Path the adjusted alignment is written to
    #[arg(long = "adjusted", default_value = DEFAULT_ADJUSTED)]
    pub adjusted: PathBuf,
    /// Path the tree printed by the inference tool is written to
    #[arg(long = "raw-tree", default_value = DEFAULT_RAW_TREE)]
    pub raw_tree: PathBuf,
    /// Path the rooted and ladderized tree is written to
    #[arg(short = 'o', long = "output", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,
    /// Record id whose sequence is left unchanged
    #[arg(long = "exception", default_value = DEFAULT_EXCEPTION_ID)]
    pub exception: String,
    /// 0-based column the gap is inserted before
    #[arg(long = "gap-position", default_value_t = DEFAULT_GAP_POSITION)]
    pub gap_position: usize,
    /// Gap character to insert (ASCII)
    #[arg(long = "gap-char", default_value_t = '-', value_parser = validate_gap)]
    pub gap_char: char,
    /// Leaf label the final tree is rooted at
    #[arg(long = "outgroup", default_value = DEFAULT_OUTGROUP)]
    pub outgroup: String,
    /// Tree inference program; receives the adjusted alignment as last argument
    #[arg(long = "tree-tool", default_value = DEFAULT_PROGRAM)]
    pub tree_tool: String,
    /// Extra argument passed to the tree inference program, repeatable (e.g. --tool-arg=-nt)
    #[arg(long = "tool-arg", action = clap::ArgAction::Append, allow_hyphen_values = true)]
    pub tool_args: Vec<String>,
    /// Order of children by subtree size
    #[arg(long = "ladderize-order", value_enum, default_value_t = Order::Ascending)]
    pub ladderize_order: Order,
    /// Optional file receiving the leaf labels of the final tree, one per line
    #[arg(long = "strain-order")]
    pub strain_order: Option<PathBuf>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Order {
    Ascending,
    Descending,
}

impl From<Order> for LadderizeOrder {
    fn from(order: Order) -> Self {
        match order {
            Order::Ascending => LadderizeOrder::Ascending,
            Order::Descending => LadderizeOrder::Descending,
        }
    }
}

fn validate_gap(input_str: &str) -> Result<char, String> {
    let mut chars = input_str.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c),
        _ => Err(format!("Gap must be a single ASCII character, got {input_str:?}")),
    }
}

impl Cli {
    /// Maps the command line onto a pipeline configuration.
    pub fn into_config(self) -> PipelineConfig {
        // validate_gap guarantees ASCII
        let gap = self.gap_char as u8;
        let rule = AdjustmentRule::new(self.exception, self.gap_position, gap);
        let inference = self
            .tool_args
            .into_iter()
            .fold(InferenceCommand::new(self.tree_tool), |command, arg| command.with_arg(arg));

        let config = PipelineConfig::default()
            .with_input(self.input)
            .with_adjusted(self.adjusted)
            .with_raw_tree(self.raw_tree)
            .with_output(self.output)
            .with_rule(rule)
            .with_outgroup(self.outgroup)
            .with_inference(inference)
            .with_ladderize_order(self.ladderize_order.into());

        match self.strain_order {
            Some(path) => config.with_strain_order(path),
            None => config,
        }
    }
}
