//! Fetch command - download sources into `raw_nodes.txt`.

use std::sync::Arc;

use nodepulse::fetch::{fetch_sources, AsyncReqwestClient};
use tracing::info;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Download every configured source and return their descriptor lines.
pub fn download(runner: &CliRunner) -> Result<Vec<String>, CliError> {
    let fetch_config = runner.config().fetch_config();
    let client = AsyncReqwestClient::with_timeout(fetch_config.timeout())?;

    println!("Fetching {} sources...", fetch_config.urls().len());
    let lines = runner.block_on(fetch_sources(
        Arc::new(client),
        fetch_config.urls(),
        runner.logger(),
    ))?;
    println!("Fetched {} descriptor lines", lines.len());
    Ok(lines)
}

/// Run the fetch command.
pub fn run(runner: &CliRunner) -> Result<(), CliError> {
    runner.log_startup("fetch");

    let lines = download(runner)?;
    runner.block_on(runner.store().write_raw_lines(&lines))?;

    let path = runner.store().path(nodepulse::storage::RAW_NODES_FILE);
    info!("Wrote {} lines to {}", lines.len(), path.display());
    println!("✓ Saved {}", path.display());
    Ok(())
}
