//! Run command - every stage in one pass.
//!
//! Sources are fetched, then the pipeline runs in memory. Artifacts are only
//! written once the whole run has succeeded.

use std::time::Instant;

use nodepulse::pipeline::PipelineRunner;
use nodepulse::probe::NodeProber;

use super::fetch::download;
use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the run command.
pub fn run(runner: &CliRunner) -> Result<(), CliError> {
    runner.log_startup("run");
    let config = runner.config().pipeline_config();
    let start = Instant::now();

    let lines = download(runner)?;

    let prober = NodeProber::new(&config, runner.logger());
    let pipeline = PipelineRunner::new(prober, config, runner.store().clone(), runner.logger());
    let summary = runner.block_on(pipeline.run(lines))?;

    println!();
    println!("Run complete in {:.1}s", start.elapsed().as_secs_f64());
    println!("  Descriptors:  {}", summary.descriptors);
    println!("  Unique nodes: {}", summary.unique_nodes);
    println!("  Reachable:    {} of {}", summary.reachable, summary.probed);
    println!("  Selected:     {}", summary.selected);
    println!("  Output:       {}", runner.store().directory().display());
    Ok(())
}
