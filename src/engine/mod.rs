// ABOUTME: Container engine client speaking the engine's HTTP API over its control socket.
// ABOUTME: Exports the client, container spec builder, settings, detection and error types.

mod client;
mod detection;
mod error;
mod settings;
mod spec;
mod types;

pub use client::{EngineClient, IMAGE_TAG, NETWORK_NAME};
pub use detection::{DetectionError, detect_socket};
pub use error::{EngineError, EngineErrorKind};
pub use settings::{DEFAULT_API_VERSION, EngineSettings};
pub use spec::ContainerSpec;
pub use types::{ContainerHandle, ContainerStatus, ContainerSummary, NetworkHandle};
