//! Probe command - `processed_nodes.json` into `tested_nodes.json`.

use std::sync::Arc;
use std::time::Instant;

use nodepulse::pipeline::probe_stage;
use nodepulse::probe::NodeProber;
use nodepulse::storage::NodeSet;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the probe command.
pub fn run(runner: &CliRunner) -> Result<(), CliError> {
    runner.log_startup("probe");
    let config = runner.config().pipeline_config();

    let nodes = runner.read_nodes(NodeSet::Processed)?;
    println!(
        "Probing up to {} of {} nodes ({} at a time, {}s timeout)...",
        config.max_nodes(),
        nodes.len(),
        config.window_size(),
        config.probe_timeout().as_secs()
    );

    let start = Instant::now();
    let prober = Arc::new(NodeProber::new(&config, runner.logger()));
    let tested = runner.block_on(probe_stage(nodes, prober, &config, runner.logger()))?;
    let reachable = tested.iter().filter(|n| n.reachable).count();

    runner.write_nodes(NodeSet::Tested, &tested)?;
    println!(
        "✓ {} of {} nodes reachable ({:.1}s)",
        reachable,
        tested.len(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}
