// ABOUTME: Build command: provision network and images without starting containers.

use super::engine_connection::connect_to_engine;
use apiruns::config::Descriptor;
use apiruns::error::Result;
use apiruns::output::Output;
use std::path::Path;
use std::sync::Arc;

pub async fn build(file: &Path, output: Arc<Output>) -> Result<()> {
    let descriptor = Descriptor::load(file)?;
    let orchestrator = connect_to_engine(&descriptor.engine, &output)?;

    output.progress("Building API");
    orchestrator.compose(&descriptor.name, false).await?;

    output.success("Services made.");
    Ok(())
}
