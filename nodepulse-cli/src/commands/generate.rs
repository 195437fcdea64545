//! Generate command - `filtered_nodes.json` into `subscription.txt` and
//! `README.md`.

use chrono::Utc;
use nodepulse::pipeline::generate_stage;
use nodepulse::storage::{NodeSet, REPORT_FILE, SUBSCRIPTION_FILE};

use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the generate command.
pub fn run(runner: &CliRunner) -> Result<(), CliError> {
    runner.log_startup("generate");
    let top_k = runner.config().pipeline_config().top_k();

    let selected = runner.read_nodes(NodeSet::Filtered)?;
    let assembly = generate_stage(selected, top_k, Utc::now(), runner.logger())?;

    let store = runner.store();
    runner.block_on(store.write_bundle(&assembly.bundle))?;
    runner.block_on(store.write_report(&assembly.report.to_markdown()))?;

    println!(
        "✓ Subscription with {} nodes: {}",
        assembly.nodes.len(),
        store.path(SUBSCRIPTION_FILE).display()
    );
    println!("✓ Report: {}", store.path(REPORT_FILE).display());
    Ok(())
}
