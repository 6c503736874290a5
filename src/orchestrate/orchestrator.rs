// ABOUTME: Orchestrator: compose and teardown workflows over an injected EngineClient.
// ABOUTME: Brings the database then the API container up, or removes a deployment by label.

use super::plan::DeploymentPlan;
use crate::engine::{
    ContainerHandle, ContainerSpec, ContainerSummary, EngineClient, EngineError, NetworkHandle,
};
use crate::http::Transport;
use crate::output::Progress;
use crate::types::DeploymentName;
use std::sync::Arc;

/// What `compose` left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    pub network: NetworkHandle,
    /// Containers observed `running`, in creation order. Empty when not started.
    pub containers: Vec<ContainerHandle>,
}

/// Runs deployment workflows against one engine.
///
/// Errors from the engine are never swallowed; the first one aborts the
/// workflow and is returned as is.
pub struct Orchestrator<T> {
    engine: EngineClient<T>,
    progress: Arc<dyn Progress>,
}

impl<T: Transport> Orchestrator<T> {
    pub fn new(engine: EngineClient<T>, progress: Arc<dyn Progress>) -> Self {
        Self { engine, progress }
    }

    /// Provision the network and images, and with `start` bring both containers up.
    ///
    /// Without `start` nothing is created: the network exists and both images
    /// are present afterwards. With `start` the database is created and waited
    /// on before the API container is created, since the API's environment
    /// refers to the database by name.
    pub async fn compose(
        &self,
        name: &DeploymentName,
        start: bool,
    ) -> Result<Composition, EngineError> {
        self.engine.ping().await?;

        let network = self.engine.ensure_network().await?;
        let plan = DeploymentPlan::new(name, &network);
        tracing::info!(
            deployment = %plan.name(),
            label = plan.label().value(),
            network = network.id.short(),
            "network ready"
        );

        if !start {
            for spec in plan.specs() {
                self.engine.ensure_image(spec.image()).await?;
            }
            return Ok(Composition {
                network,
                containers: Vec::new(),
            });
        }

        let mut containers = Vec::with_capacity(2);
        for spec in plan.specs() {
            containers.push(self.launch(spec).await?);
        }

        Ok(Composition {
            network,
            containers,
        })
    }

    async fn launch(&self, spec: &ContainerSpec) -> Result<ContainerHandle, EngineError> {
        tracing::info!(container = spec.name(), image = spec.image(), "launching");
        let id = self.engine.create_container(spec).await?;
        self.engine.wait_until_ready(&id).await
    }

    /// Remove every container labeled for `name`, in list order.
    ///
    /// Returns the removed containers.
    pub async fn teardown(
        &self,
        name: &DeploymentName,
    ) -> Result<Vec<ContainerSummary>, EngineError> {
        let containers = self.engine.list_by_label(name).await?;
        tracing::info!(deployment = %name, count = containers.len(), "tearing down");

        for container in &containers {
            self.progress
                .notice(&format!("Removing container `{}`.", container.display_name()));
            self.engine.delete_container(&container.id).await?;
        }

        Ok(containers)
    }
}
