// ABOUTME: Handles and summaries returned by engine operations.
// ABOUTME: Includes the container status values the readiness poll understands.

use crate::types::{ContainerId, NetworkId};
use serde::Deserialize;
use std::fmt;

/// Container status as reported under `.State.Status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerStatus {
    Created,
    Running,
    Exited,
    /// Any other engine value (`restarting`, `paused`, ...).
    Other(String),
}

impl ContainerStatus {
    pub fn parse(value: &str) -> Self {
        match value {
            "created" => ContainerStatus::Created,
            "running" => ContainerStatus::Running,
            "exited" => ContainerStatus::Exited,
            other => ContainerStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ContainerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerStatus::Created => f.write_str("created"),
            ContainerStatus::Running => f.write_str("running"),
            ContainerStatus::Exited => f.write_str("exited"),
            ContainerStatus::Other(value) => f.write_str(value),
        }
    }
}

/// The network every container of a run is attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkHandle {
    pub name: String,
    pub id: NetworkId,
}

/// A container and the last status observed for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerHandle {
    pub id: ContainerId,
    pub status: ContainerStatus,
}

/// One entry of the container list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContainerSummary {
    #[serde(rename = "Id")]
    pub id: ContainerId,
    #[serde(rename = "Names", default)]
    pub names: Vec<String>,
}

impl ContainerSummary {
    /// First name without the engine's leading slash, or the short ID.
    pub fn display_name(&self) -> &str {
        self.names
            .first()
            .map(|n| n.trim_start_matches('/'))
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| self.id.short())
    }
}
