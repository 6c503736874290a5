// ABOUTME: Shared helper for building the orchestrator from engine settings.
// ABOUTME: Resolves the control socket once and wires one transport into one client.

use apiruns::engine::{EngineClient, EngineSettings, detect_socket};
use apiruns::error::Result;
use apiruns::http::HttpTransport;
use apiruns::orchestrate::Orchestrator;
use apiruns::output::{Output, Progress};
use std::sync::Arc;

/// Connect to the local engine and return an orchestrator bound to it.
///
/// The socket is only resolved here; the connection itself opens on the first call.
pub fn connect_to_engine(
    settings: &EngineSettings,
    output: &Arc<Output>,
) -> Result<Orchestrator<HttpTransport>> {
    let socket = detect_socket(settings)?;
    tracing::debug!(socket = %socket.display(), "using engine socket");

    let progress: Arc<dyn Progress> = output.clone();
    let engine = EngineClient::new(HttpTransport::unix(socket), settings, progress.clone());
    Ok(Orchestrator::new(engine, progress))
}
