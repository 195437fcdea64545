//! Select command - `tested_nodes.json` into `filtered_nodes.json`.

use nodepulse::pipeline::select_stage;
use nodepulse::storage::NodeSet;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the select command.
pub fn run(runner: &CliRunner) -> Result<(), CliError> {
    runner.log_startup("select");
    let top_k = runner.config().pipeline_config().top_k();

    let tested = runner.read_nodes(NodeSet::Tested)?;
    let selected = select_stage(tested, top_k, runner.logger())?;

    runner.write_nodes(NodeSet::Filtered, &selected)?;
    if let (Some(first), Some(last)) = (selected.first(), selected.last()) {
        println!(
            "✓ Kept {} nodes ({:.2} ms to {:.2} ms)",
            selected.len(),
            first.latency_ms.unwrap_or_default(),
            last.latency_ms.unwrap_or_default()
        );
    }
    Ok(())
}
