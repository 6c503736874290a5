// ABOUTME: Type-safe identifiers and validated domain types.
// ABOUTME: Uses phantom types to keep container and network IDs apart at compile time.

mod deployment_name;
mod id;
mod label;

pub use deployment_name::{DeploymentName, DeploymentNameError};
pub use id::{ContainerId, NetworkId};
pub use label::{DeploymentLabel, LABEL_KEY, SERVICE_TAG};
