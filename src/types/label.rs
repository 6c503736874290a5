// ABOUTME: Deployment label attached to every container of one deployment.
// ABOUTME: The same label drives creation-time labels and the teardown list filter.

use super::DeploymentName;
use serde_json::json;
use std::collections::BTreeMap;

/// Label key used on every container this tool creates.
pub const LABEL_KEY: &str = "service";

/// Fixed tag combined with the deployment name to form the label value.
pub const SERVICE_TAG: &str = "apiruns";

/// The `service=apiruns-<name>` label of one deployment.
///
/// Derived purely from the deployment name, so a label computed during
/// `compose` always matches the one computed later by `teardown`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentLabel {
    value: String,
}

impl DeploymentLabel {
    pub fn for_deployment(name: &DeploymentName) -> Self {
        Self {
            value: format!("{SERVICE_TAG}-{name}"),
        }
    }

    pub fn key(&self) -> &str {
        LABEL_KEY
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Label set to put on a container.
    pub fn to_labels(&self) -> BTreeMap<String, String> {
        BTreeMap::from([(LABEL_KEY.to_string(), self.value.clone())])
    }

    /// Filter object for the container list endpoint.
    pub fn filter(&self) -> String {
        json!({ "label": [format!("{LABEL_KEY}={}", self.value)] }).to_string()
    }

    /// [`filter`](Self::filter), ready for a `filters=` query parameter.
    pub fn encoded_filter(&self) -> String {
        urlencoding::encode(&self.filter()).into_owned()
    }
}
