// ABOUTME: Deployment workflows composed from engine operations.
// ABOUTME: Exports the Orchestrator, its DeploymentPlan and the fixed workload constants.

mod orchestrator;
mod plan;

pub use orchestrator::{Composition, Orchestrator};
pub use plan::{API_IMAGE, API_PORT, DATABASE_IMAGE, DATABASE_PORT, DeploymentPlan};
