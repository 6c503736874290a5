// ABOUTME: Deployment descriptor (apiruns-compose.yml) parsing and validation.
// ABOUTME: Yields the deployment name, its model entries and optional engine settings.

mod validate;

pub use validate::{FIELD_TYPES, ValidationErrors, validate_entries};

use crate::engine::EngineSettings;
use crate::error::{Error, Result};
use crate::types::DeploymentName;
use nonempty::NonEmpty;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

pub const DESCRIPTOR_FILENAME: &str = "apiruns-compose.yml";

/// One model to seed into the API: a route path and its field schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelEntry {
    pub path: String,
    pub schema: Value,
}

/// A validated deployment descriptor.
#[derive(Debug, Clone)]
pub struct Descriptor {
    pub name: DeploymentName,
    pub models: NonEmpty<ModelEntry>,
    pub engine: EngineSettings,
}

#[derive(Deserialize)]
struct RawDescriptor {
    // Reserved: `engine` is never taken as an API name
    #[serde(default)]
    engine: EngineSettings,
    #[serde(flatten)]
    apis: BTreeMap<String, Value>,
}

impl Descriptor {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document parses as null rather than as an empty mapping
        let raw: Option<RawDescriptor> = serde_yaml::from_str(yaml)?;
        let raw = raw.ok_or_else(|| Error::InvalidDescriptor("no API defined".to_string()))?;

        let mut apis = raw.apis.into_iter();
        let (name, entries) = match (apis.next(), apis.next()) {
            (Some(api), None) => api,
            (None, _) => return Err(Error::InvalidDescriptor("no API defined".to_string())),
            (Some(_), Some(_)) => {
                return Err(Error::InvalidDescriptor(
                    "exactly one API must be defined per descriptor".to_string(),
                ));
            }
        };

        let name = DeploymentName::new(&name)
            .map_err(|e| Error::InvalidDescriptor(format!("API name `{name}`: {e}")))?;

        let entries = match entries {
            Value::Array(entries) => entries,
            _ => {
                return Err(Error::InvalidDescriptor(format!(
                    "API `{name}` must be a list of path/schema entries"
                )));
            }
        };

        let errors = validate_entries(&entries);
        if !errors.is_empty() {
            return Err(Error::SchemaValidation { errors });
        }

        let models = entries
            .into_iter()
            .filter_map(|entry| match entry {
                Value::Object(mut fields) => Some(ModelEntry {
                    path: fields
                        .remove("path")
                        .and_then(|p| p.as_str().map(str::to_string))
                        .unwrap_or_default(),
                    schema: fields.remove("schema").unwrap_or_default(),
                }),
                _ => None,
            })
            .collect::<Vec<_>>();

        let models = NonEmpty::from_vec(models)
            .ok_or_else(|| Error::InvalidDescriptor(format!("API `{name}` defines no models")))?;

        Ok(Self {
            name,
            models,
            engine: raw.engine,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::DescriptorNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }
}
