//! Parse command - `raw_nodes.txt` into `processed_nodes.json`.

use nodepulse::pipeline::parse_stage;
use nodepulse::storage::NodeSet;
use tracing::error;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the parse command.
pub fn run(runner: &CliRunner) -> Result<(), CliError> {
    runner.log_startup("parse");

    let lines = runner
        .block_on(runner.store().read_raw_lines())
        .map_err(|e| {
            error!("{}", e);
            CliError::Storage(e)
        })?;
    let nodes = parse_stage(&lines, runner.logger())?;

    runner.write_nodes(NodeSet::Processed, &nodes)?;
    println!("✓ Parsed {} unique nodes from {} lines", nodes.len(), lines.len());
    Ok(())
}
