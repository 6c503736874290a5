// ABOUTME: DeploymentPlan: the ordered database + API container pair of one deployment.
// ABOUTME: Fixes images, ports, container names and the API's database wiring.

use crate::engine::{ContainerSpec, NetworkHandle};
use crate::types::{DeploymentLabel, DeploymentName, SERVICE_TAG};

pub const DATABASE_IMAGE: &str = "mongo";
pub const DATABASE_PORT: u16 = 27017;
pub const API_IMAGE: &str = "apiruns/engine";
pub const API_PORT: u16 = 8000;

/// The two containers of a deployment, database first.
///
/// The API container resolves the database by container name on the shared
/// network, so it may only be created once the database is running.
#[derive(Debug, Clone)]
pub struct DeploymentPlan {
    name: DeploymentName,
    label: DeploymentLabel,
    database: ContainerSpec,
    api: ContainerSpec,
}

impl DeploymentPlan {
    pub fn new(name: &DeploymentName, network: &NetworkHandle) -> Self {
        let label = DeploymentLabel::for_deployment(name);
        let database_name = container_name(name, "db");

        let database = ContainerSpec::new(
            database_name.clone(),
            DATABASE_IMAGE,
            DATABASE_PORT,
            network.clone(),
            label.to_labels(),
        );

        let api = ContainerSpec::new(
            container_name(name, "api"),
            API_IMAGE,
            API_PORT,
            network.clone(),
            label.to_labels(),
        )
        .with_env([
            format!("ENGINE_DB_HOST={database_name}"),
            format!("ENGINE_DB_PORT={DATABASE_PORT}"),
            format!("ENGINE_DB_NAME={name}"),
            format!("ENGINE_PORT={API_PORT}"),
        ]);

        Self {
            name: name.clone(),
            label,
            database,
            api,
        }
    }

    pub fn name(&self) -> &DeploymentName {
        &self.name
    }

    pub fn label(&self) -> &DeploymentLabel {
        &self.label
    }

    pub fn database(&self) -> &ContainerSpec {
        &self.database
    }

    pub fn api(&self) -> &ContainerSpec {
        &self.api
    }

    /// Specs in creation order.
    pub fn specs(&self) -> [&ContainerSpec; 2] {
        [&self.database, &self.api]
    }
}

/// `apiruns-<name>-<role>`
fn container_name(name: &DeploymentName, role: &str) -> String {
    format!("{SERVICE_TAG}-{name}-{role}")
}
