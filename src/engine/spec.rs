// ABOUTME: ContainerSpec value object and its container-create request body.
// ABOUTME: Pure data; all engine I/O lives in the client.

use super::types::NetworkHandle;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

/// Everything needed to ask the engine for one container.
///
/// Built once and never mutated; the client only ever reads it to derive the
/// request payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerSpec {
    name: String,
    image: String,
    port: u16,
    network: NetworkHandle,
    labels: BTreeMap<String, String>,
    env: Vec<String>,
}

impl ContainerSpec {
    pub fn new(
        name: impl Into<String>,
        image: impl Into<String>,
        port: u16,
        network: NetworkHandle,
        labels: BTreeMap<String, String>,
    ) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            port,
            network,
            labels,
            env: Vec::new(),
        }
    }

    /// Environment assignments (`KEY=value`), kept in the given order.
    pub fn with_env<I, S>(mut self, env: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.env = env.into_iter().map(Into::into).collect();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn labels(&self) -> &BTreeMap<String, String> {
        &self.labels
    }

    pub fn env(&self) -> &[String] {
        &self.env
    }

    fn port_key(&self) -> String {
        format!("{}/tcp", self.port)
    }

    /// `{"<port>/tcp": {}}`
    pub fn exposed_ports(&self) -> Value {
        let mut ports = Map::new();
        ports.insert(self.port_key(), json!({}));
        Value::Object(ports)
    }

    /// `{"<port>/tcp": [{"HostIp": "", "HostPort": "<port>"}]}`: same port on the host.
    pub fn port_bindings(&self) -> Value {
        let mut bindings = Map::new();
        bindings.insert(
            self.port_key(),
            json!([{ "HostIp": "", "HostPort": self.port.to_string() }]),
        );
        Value::Object(bindings)
    }

    /// Body for `POST /containers/create`.
    ///
    /// `Env` is left out entirely when there are no assignments.
    pub fn to_request_body(&self) -> Value {
        let mut endpoints = Map::new();
        endpoints.insert(
            self.network.name.clone(),
            json!({ "NetworkID": self.network.id.as_str() }),
        );

        let mut body = json!({
            "Image": self.image,
            "Labels": self.labels,
            "ExposedPorts": self.exposed_ports(),
            "HostConfig": { "PortBindings": self.port_bindings() },
            "NetworkingConfig": { "EndpointsConfig": endpoints },
        });

        if !self.env.is_empty() {
            body["Env"] = json!(self.env);
        }

        body
    }
}
