//! Invocation of the external tree inference program.

use crate::error::{PipelineError, Result};
use log::{debug, info};
use std::fs::{self, File};
use std::path::Path;
use std::process::{Command, Stdio};

/// Program run to infer the tree when nothing else is configured.
pub const DEFAULT_PROGRAM: &str = "fasttree";

/// External command that reads an alignment and prints a Newick tree on
/// standard output.
///
/// The alignment path is passed as the last argument, after `args`.
/// Standard error is inherited, so the progress output of the program stays
/// visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceCommand {
    /// Program name or path, looked up in `PATH`
    pub program: String,
    /// Arguments placed before the alignment path
    pub args: Vec<String>,
}

impl Default for InferenceCommand {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl InferenceCommand {
    /// Creates a command for `program` without extra arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Appends an argument placed before the alignment path.
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Runs the program on `input`, writing its standard output to `output`.
    ///
    /// Blocks until the program exits. `output` is created or overwritten.
    ///
    /// # Errors
    /// * [PipelineError::Io] if `output` cannot be created or inspected
    /// * [PipelineError::InferenceSpawn] if the program cannot be started
    /// * [PipelineError::InferenceFailed] if it exits unsuccessfully
    /// * [PipelineError::EmptyInferenceOutput] if it wrote nothing
    pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(&self, input: P, output: Q) -> Result<()> {
        let input = input.as_ref();
        let output = output.as_ref();
        let stdout = File::create(output).map_err(|e| PipelineError::io(output, e))?;

        info!("Running {} on {}", self.program, input.display());
        debug!("Arguments: {:?}, output: {}", self.args, output.display());
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(input)
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| PipelineError::InferenceSpawn {
                program: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(PipelineError::InferenceFailed {
                program: self.program.clone(),
                status,
            });
        }

        let written = fs::metadata(output).map_err(|e| PipelineError::io(output, e))?.len();
        if written == 0 {
            return Err(PipelineError::EmptyInferenceOutput(output.to_path_buf()));
        }
        debug!("{} wrote {written} bytes", self.program);
        Ok(())
    }
}
