// ABOUTME: Down command: remove every container labeled for the descriptor's API.

use super::engine_connection::connect_to_engine;
use apiruns::config::Descriptor;
use apiruns::error::Result;
use apiruns::output::Output;
use std::path::Path;
use std::sync::Arc;

pub async fn down(file: &Path, output: Arc<Output>) -> Result<()> {
    let descriptor = Descriptor::load(file)?;
    let orchestrator = connect_to_engine(&descriptor.engine, &output)?;

    let removed = orchestrator.teardown(&descriptor.name).await?;
    if removed.is_empty() {
        output.success(&format!("No containers found for {}.", descriptor.name));
    } else {
        output.success("Services removed.");
    }
    Ok(())
}
