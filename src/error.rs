// ABOUTME: Application-wide error types for apiruns.
// ABOUTME: Wraps descriptor, detection, engine and workload failures for the CLI boundary.

use crate::config::ValidationErrors;
use crate::engine::{DetectionError, EngineError};
use crate::workload::WorkloadError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("descriptor not found: {0}")]
    DescriptorNotFound(PathBuf),

    #[error("invalid descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("error validating schema: {}", format_validation(errors))]
    SchemaValidation { errors: ValidationErrors },

    #[error(transparent)]
    Detection(#[from] DetectionError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Workload(#[from] WorkloadError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("error reading yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

fn format_validation(errors: &ValidationErrors) -> String {
    errors
        .iter()
        .map(|(field, messages)| format!("{field}: {}", messages.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, Error>;
