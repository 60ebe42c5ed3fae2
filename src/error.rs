//! Errors raised while running the tree preparation pipeline.

use crate::model::TreeError;
use crate::parser::ParsingError;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Error type for the alignment, inference and tree stages of the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A file could not be opened, created, read or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The alignment file holds a malformed FASTA record.
    #[error("malformed FASTA in {}: {source}", path.display())]
    Fasta {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The tree file is not valid Newick.
    #[error("Newick parsing failed: {0}")]
    Newick(#[from] ParsingError),

    /// Rerooting failed, e.g. the outgroup is missing.
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// The inference program could not be started.
    #[error("failed to start '{program}': {source}")]
    InferenceSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The inference program exited unsuccessfully.
    #[error("'{program}' exited with {status}")]
    InferenceFailed { program: String, status: ExitStatus },

    /// The inference program succeeded but wrote no tree.
    #[error("inference produced an empty tree file {}", .0.display())]
    EmptyInferenceOutput(PathBuf),
}

impl PipelineError {
    /// Wraps an I/O error together with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias for pipeline results.
pub type Result<T> = std::result::Result<T, PipelineError>;
