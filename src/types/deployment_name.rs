// ABOUTME: Validated deployment name taken from the descriptor's top-level key.
// ABOUTME: Restricted to characters the engine accepts inside container names.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeploymentNameError {
    #[error("deployment name cannot be empty")]
    Empty,

    #[error("deployment name exceeds maximum length of 63 characters")]
    TooLong,

    #[error("deployment name must start with a letter or digit")]
    InvalidStart,

    #[error("invalid character in deployment name: '{0}'")]
    InvalidChar(char),
}

/// Name of one deployment, e.g. `MyAPI`.
///
/// Case is preserved: it ends up in container names and in the deployment
/// label, both of which are case-sensitive on the engine side.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeploymentName(String);

impl DeploymentName {
    pub fn new(value: &str) -> Result<Self, DeploymentNameError> {
        let first = value.chars().next().ok_or(DeploymentNameError::Empty)?;

        if value.len() > 63 {
            return Err(DeploymentNameError::TooLong);
        }

        if !first.is_ascii_alphanumeric() {
            return Err(DeploymentNameError::InvalidStart);
        }

        if let Some(c) = value
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() && !matches!(c, '_' | '.' | '-'))
        {
            return Err(DeploymentNameError::InvalidChar(c));
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeploymentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
