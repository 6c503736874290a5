// ABOUTME: EngineClient: container engine operations over the HTTP API.
// ABOUTME: Network/image provisioning, container lifecycle, readiness polling, label lookup.

use super::error::EngineError;
use super::settings::EngineSettings;
use super::spec::ContainerSpec;
use super::types::{ContainerHandle, ContainerStatus, ContainerSummary, NetworkHandle};
use crate::http::{ApiRequest, ApiResponse, Transport};
use crate::output::Progress;
use crate::types::{ContainerId, DeploymentLabel, DeploymentName, NetworkId};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Name of the single network every deployment is attached to.
pub const NETWORK_NAME: &str = "apiruns";

/// Tag pulled for every image.
pub const IMAGE_TAG: &str = "latest";

#[derive(Deserialize)]
struct IdBody {
    #[serde(rename = "Id")]
    id: String,
}

#[derive(Deserialize)]
struct InspectBody {
    #[serde(rename = "State")]
    state: StateBody,
}

#[derive(Deserialize)]
struct StateBody {
    #[serde(rename = "Status")]
    status: String,
}

/// One line of the pull progress stream; only the failure fields matter.
#[derive(Deserialize)]
struct PullProgress {
    error: Option<String>,
    #[serde(rename = "errorDetail")]
    error_detail: Option<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

/// First error reported in a pull progress stream.
///
/// The engine answers 200 before pulling and reports failures as a JSON line
/// in the streamed body.
fn pull_error(body: &[u8]) -> Option<String> {
    body.split(|b| *b == b'\n')
        .filter_map(|line| serde_json::from_slice::<PullProgress>(line).ok())
        .find_map(|line| {
            let detail = line.error_detail.and_then(|d| d.message);
            detail.or(line.error)
        })
}

fn decode<T: serde::de::DeserializeOwned>(
    resp: &ApiResponse,
    operation: &'static str,
) -> Result<T, EngineError> {
    resp.json()
        .map_err(|source| EngineError::MalformedResponse { operation, source })
}

/// Client for the engine's HTTP API.
///
/// Holds one transport for the whole process; every call goes through it in
/// sequence. Construct it once and hand it to the orchestrator.
pub struct EngineClient<T> {
    transport: T,
    prefix: String,
    poll_interval: Duration,
    ready_timeout: Option<Duration>,
    progress: Arc<dyn Progress>,
}

impl<T: Transport> EngineClient<T> {
    pub fn new(transport: T, settings: &EngineSettings, progress: Arc<dyn Progress>) -> Self {
        Self {
            transport,
            prefix: settings.path_prefix(),
            poll_interval: settings.poll_interval,
            ready_timeout: settings.ready_timeout,
            progress,
        }
    }

    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, EngineError> {
        let request = ApiRequest {
            path: format!("{}{}", self.prefix, request.path),
            ..request
        };
        Ok(self.transport.send(request).await?)
    }

    /// `GET /_ping`.
    pub async fn ping(&self) -> Result<(), EngineError> {
        let resp = self.send(ApiRequest::get("/_ping")).await?;
        if resp.status != 200 {
            return Err(EngineError::PingFailed {
                status: resp.status,
            });
        }
        Ok(())
    }

    /// Return the `apiruns` network, creating it when the lookup does not find it.
    ///
    /// Check-then-create is not atomic: two concurrent runs may both try to
    /// create it, and the loser gets `NetworkCreationFailed`.
    pub async fn ensure_network(&self) -> Result<NetworkHandle, EngineError> {
        let resp = self
            .send(ApiRequest::get(format!("/networks/{NETWORK_NAME}")))
            .await?;

        if resp.status == 200 {
            let body: IdBody = decode(&resp, "network inspect")?;
            tracing::debug!(network = NETWORK_NAME, id = %body.id, "network exists");
            return Ok(NetworkHandle {
                name: NETWORK_NAME.to_string(),
                id: NetworkId::new(body.id),
            });
        }

        let resp = self
            .send(ApiRequest::post_json(
                "/networks/create",
                json!({ "name": NETWORK_NAME }),
            ))
            .await?;

        if resp.status != 201 {
            return Err(EngineError::NetworkCreationFailed {
                network: NETWORK_NAME.to_string(),
                status: resp.status,
                message: resp.error_message(),
            });
        }

        let body: IdBody = decode(&resp, "network create")?;
        tracing::info!(network = NETWORK_NAME, id = %body.id, "network created");
        Ok(NetworkHandle {
            name: NETWORK_NAME.to_string(),
            id: NetworkId::new(body.id),
        })
    }

    /// Make sure `<image>:latest` is present locally, pulling it if needed.
    ///
    /// A pull that answers 200 but ends its progress stream with an error
    /// still fails with `ImagePullFailed`.
    pub async fn ensure_image(&self, image: &str) -> Result<(), EngineError> {
        let resp = self
            .send(ApiRequest::get(format!("/images/{image}:{IMAGE_TAG}/json")))
            .await?;

        if resp.status == 200 {
            tracing::debug!(image, "image present");
            return Ok(());
        }

        self.progress.notice(&format!("Pulling `{image}` image."));

        let resp = self
            .send(ApiRequest::post(format!(
                "/images/create?fromImage={}&tag={IMAGE_TAG}",
                urlencoding::encode(image)
            )))
            .await?;

        if resp.status != 200 {
            return Err(EngineError::ImagePullFailed {
                image: image.to_string(),
                status: resp.status,
                message: resp.error_message(),
            });
        }

        if let Some(message) = pull_error(&resp.body) {
            return Err(EngineError::ImagePullFailed {
                image: image.to_string(),
                status: resp.status,
                message,
            });
        }

        tracing::info!(image, "image pulled");
        Ok(())
    }

    /// Ensure the image, create the container and start it.
    pub async fn create_container(&self, spec: &ContainerSpec) -> Result<ContainerId, EngineError> {
        self.ensure_image(spec.image()).await?;

        let resp = self
            .send(ApiRequest::post_json(
                format!("/containers/create?name={}", urlencoding::encode(spec.name())),
                spec.to_request_body(),
            ))
            .await?;

        if resp.status != 201 {
            return Err(EngineError::ContainerCreationFailed {
                name: spec.name().to_string(),
                status: resp.status,
                message: resp.error_message(),
            });
        }

        let body: IdBody = decode(&resp, "container create")?;
        let id = ContainerId::new(body.id);
        tracing::info!(name = spec.name(), id = id.short(), "container created");

        self.start_container(&id).await?;
        Ok(id)
    }

    /// `POST /containers/{id}/start`; anything but 204 is a failure.
    pub async fn start_container(&self, id: &ContainerId) -> Result<(), EngineError> {
        let resp = self
            .send(ApiRequest::post(format!("/containers/{id}/start")))
            .await?;

        if resp.status != 204 {
            return Err(EngineError::ContainerStartFailed {
                id: id.clone(),
                status: resp.status,
                message: resp.error_message(),
            });
        }

        tracing::debug!(id = id.short(), "container started");
        Ok(())
    }

    /// Current `.State.Status` of a container.
    pub async fn get_status(&self, id: &ContainerId) -> Result<ContainerStatus, EngineError> {
        let resp = self
            .send(ApiRequest::get(format!("/containers/{id}/json")))
            .await?;

        if resp.status != 200 {
            return Err(EngineError::GettingStatusFailed {
                id: id.clone(),
                status: resp.status,
                message: resp.error_message(),
            });
        }

        let body: InspectBody = decode(&resp, "container inspect")?;
        Ok(ContainerStatus::parse(&body.state.status))
    }

    /// Poll the container until it is `running` (ready) or `exited` (failed).
    ///
    /// Other statuses are polled again after the poll interval. Without a
    /// configured `ready_timeout` this waits indefinitely. Query failures are
    /// returned immediately, never retried.
    pub async fn wait_until_ready(&self, id: &ContainerId) -> Result<ContainerHandle, EngineError> {
        let started = Instant::now();

        loop {
            match self.get_status(id).await? {
                ContainerStatus::Running => {
                    tracing::info!(id = id.short(), "container running");
                    return Ok(ContainerHandle {
                        id: id.clone(),
                        status: ContainerStatus::Running,
                    });
                }
                ContainerStatus::Exited => {
                    return Err(EngineError::ContainerExited { id: id.clone() });
                }
                status => {
                    tracing::debug!(id = id.short(), %status, "container not ready");
                }
            }

            if let Some(limit) = self.ready_timeout
                && started.elapsed() >= limit
            {
                return Err(EngineError::ReadyTimeout {
                    id: id.clone(),
                    waited: started.elapsed(),
                });
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Containers (running or not) carrying the deployment's label.
    pub async fn list_by_label(
        &self,
        name: &DeploymentName,
    ) -> Result<Vec<ContainerSummary>, EngineError> {
        let label = DeploymentLabel::for_deployment(name);
        let resp = self
            .send(ApiRequest::get(format!(
                "/containers/json?all=true&filters={}",
                label.encoded_filter()
            )))
            .await?;

        if resp.status != 200 {
            return Err(EngineError::ListingFailed {
                status: resp.status,
                message: resp.error_message(),
            });
        }

        decode(&resp, "container list")
    }

    /// Force-remove a container, running or not.
    pub async fn delete_container(&self, id: &ContainerId) -> Result<(), EngineError> {
        let resp = self
            .send(ApiRequest::delete(format!("/containers/{id}?force=true")))
            .await?;

        if resp.status != 204 {
            return Err(EngineError::DeletingFailed {
                id: id.clone(),
                status: resp.status,
                message: resp.error_message(),
            });
        }

        tracing::info!(id = id.short(), "container removed");
        Ok(())
    }
}
