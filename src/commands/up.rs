// ABOUTME: Up command: bring the database and API containers up, then seed the models.
// ABOUTME: Hands off to the workload client once the API container is running.

use super::engine_connection::connect_to_engine;
use apiruns::config::Descriptor;
use apiruns::error::Result;
use apiruns::orchestrate::API_PORT;
use apiruns::output::Output;
use apiruns::workload::WorkloadClient;
use std::path::Path;
use std::sync::Arc;

pub async fn up(file: &Path, output: Arc<Output>) -> Result<()> {
    let descriptor = Descriptor::load(file)?;
    let orchestrator = connect_to_engine(&descriptor.engine, &output)?;

    output.progress("Building API");
    let composition = orchestrator.compose(&descriptor.name, true).await?;
    for container in &composition.containers {
        tracing::debug!(id = %container.id, status = %container.status, "container up");
    }

    output.progress("Starting services");
    let api = WorkloadClient::local();
    api.wait_until_live().await?;
    api.create_models(&descriptor.models).await?;

    output.success(&format!("API listen on {API_PORT}"));
    Ok(())
}
