mod cli;

use clap::Parser;
use cli::Cli;
use log::{debug, error, info};
use phyloprep::pipeline::run_pipeline;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    debug!("Parsing commandline arguments");
    let config = cli.into_config();
    debug!("{config:?}");

    match run_pipeline(&config) {
        Ok(summary) => {
            info!(
                "Done: {} records adjusted, final tree with {} leaves at {}",
                summary.alignment.num_adjusted,
                summary.tree.num_leaves(),
                config.output.display()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
