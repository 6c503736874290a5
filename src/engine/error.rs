// ABOUTME: Error taxonomy for engine API operations.
// ABOUTME: Separates unreachable-engine failures from per-operation status rejections.

use crate::http::TransportError;
use crate::types::ContainerId;
use std::time::Duration;

/// Errors from talking to the container engine.
///
/// `EngineUnreachable` means no HTTP response was obtained at all; every other
/// variant means the engine answered, but not with what the operation expects.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("container engine is unreachable: {0}")]
    EngineUnreachable(#[from] TransportError),

    #[error("engine health check failed with status {status}")]
    PingFailed { status: u16 },

    #[error("failed to create network {network} (status {status}): {message}")]
    NetworkCreationFailed {
        network: String,
        status: u16,
        message: String,
    },

    #[error("failed to pull image {image} (status {status}): {message}")]
    ImagePullFailed {
        image: String,
        status: u16,
        message: String,
    },

    #[error("failed to create container {name} (status {status}): {message}")]
    ContainerCreationFailed {
        name: String,
        status: u16,
        message: String,
    },

    #[error("failed to start container {id} (status {status}): {message}")]
    ContainerStartFailed {
        id: ContainerId,
        status: u16,
        message: String,
    },

    #[error("failed to get status of container {id} (status {status}): {message}")]
    GettingStatusFailed {
        id: ContainerId,
        status: u16,
        message: String,
    },

    #[error("container {id} exited before becoming ready")]
    ContainerExited { id: ContainerId },

    #[error("container {id} not running after {}s", waited.as_secs())]
    ReadyTimeout { id: ContainerId, waited: Duration },

    #[error("failed to list containers (status {status}): {message}")]
    ListingFailed { status: u16, message: String },

    #[error("failed to delete container {id} (status {status}): {message}")]
    DeletingFailed {
        id: ContainerId,
        status: u16,
        message: String,
    },

    #[error("unexpected response from {operation}: {source}")]
    MalformedResponse {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineErrorKind {
    EngineUnreachable,
    PingFailed,
    NetworkCreationFailed,
    ImagePullFailed,
    ContainerCreationFailed,
    ContainerStartFailed,
    GettingStatusFailed,
    ContainerExited,
    ReadyTimeout,
    ListingFailed,
    DeletingFailed,
    MalformedResponse,
}

impl EngineError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> EngineErrorKind {
        match self {
            EngineError::EngineUnreachable(_) => EngineErrorKind::EngineUnreachable,
            EngineError::PingFailed { .. } => EngineErrorKind::PingFailed,
            EngineError::NetworkCreationFailed { .. } => EngineErrorKind::NetworkCreationFailed,
            EngineError::ImagePullFailed { .. } => EngineErrorKind::ImagePullFailed,
            EngineError::ContainerCreationFailed { .. } => {
                EngineErrorKind::ContainerCreationFailed
            }
            EngineError::ContainerStartFailed { .. } => EngineErrorKind::ContainerStartFailed,
            EngineError::GettingStatusFailed { .. } => EngineErrorKind::GettingStatusFailed,
            EngineError::ContainerExited { .. } => EngineErrorKind::ContainerExited,
            EngineError::ReadyTimeout { .. } => EngineErrorKind::ReadyTimeout,
            EngineError::ListingFailed { .. } => EngineErrorKind::ListingFailed,
            EngineError::DeletingFailed { .. } => EngineErrorKind::DeletingFailed,
            EngineError::MalformedResponse { .. } => EngineErrorKind::MalformedResponse,
        }
    }

    /// HTTP status the engine answered with, if it answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            EngineError::PingFailed { status }
            | EngineError::NetworkCreationFailed { status, .. }
            | EngineError::ImagePullFailed { status, .. }
            | EngineError::ContainerCreationFailed { status, .. }
            | EngineError::ContainerStartFailed { status, .. }
            | EngineError::GettingStatusFailed { status, .. }
            | EngineError::ListingFailed { status, .. }
            | EngineError::DeletingFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}
