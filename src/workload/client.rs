// ABOUTME: Client for the generated API container once it is running.
// ABOUTME: Waits for its health endpoint, then seeds the descriptor's models.

use super::error::{ModelRejectedSnafu, NotLiveSnafu, RequestSnafu, WorkloadError};
use crate::config::ModelEntry;
use crate::http::{ApiRequest, HttpTransport, Transport};
use crate::orchestrate::API_PORT;
use nonempty::NonEmpty;
use serde_json::json;
use snafu::{ResultExt, ensure};
use std::time::Duration;

pub const PING_PATH: &str = "/ping";
pub const MODELS_PATH: &str = "/admin/models";

const DEFAULT_ATTEMPTS: u32 = 60;
const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// Talks to the API container on its published port.
pub struct WorkloadClient<T> {
    transport: T,
    attempts: u32,
    interval: Duration,
}

impl WorkloadClient<HttpTransport> {
    /// Client for `localhost:<API_PORT>`.
    pub fn local() -> Self {
        Self::new(HttpTransport::tcp(format!("localhost:{API_PORT}")))
    }
}

impl<T: Transport> WorkloadClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            attempts: DEFAULT_ATTEMPTS,
            interval: DEFAULT_INTERVAL,
        }
    }

    /// Override how many pings to try and how long to wait between them.
    pub fn with_retry(mut self, attempts: u32, interval: Duration) -> Self {
        self.attempts = attempts.max(1);
        self.interval = interval;
        self
    }

    /// Ping until the API answers 200.
    ///
    /// Connection failures count as "not yet": the server inside a freshly
    /// started container refuses connections for a while.
    pub async fn wait_until_live(&self) -> Result<(), WorkloadError> {
        for attempt in 1..=self.attempts {
            match self.transport.send(ApiRequest::get(PING_PATH)).await {
                Ok(resp) if resp.status == 200 => {
                    tracing::info!(attempt, "API is live");
                    return Ok(());
                }
                Ok(resp) => tracing::debug!(attempt, status = resp.status, "API not live yet"),
                Err(e) => tracing::debug!(attempt, "API not reachable yet: {}", e),
            }

            if attempt < self.attempts {
                tokio::time::sleep(self.interval).await;
            }
        }

        NotLiveSnafu {
            attempts: self.attempts,
        }
        .fail()
    }

    /// Post every model entry, in descriptor order.
    pub async fn create_models(&self, models: &NonEmpty<ModelEntry>) -> Result<(), WorkloadError> {
        for model in models.iter() {
            let resp = self
                .transport
                .send(ApiRequest::post_json(
                    MODELS_PATH,
                    json!({ "path": model.path, "schema": model.schema }),
                ))
                .await
                .context(RequestSnafu)?;

            ensure!(
                resp.status == 200 || resp.status == 201,
                ModelRejectedSnafu {
                    path: model.path.clone(),
                    status: resp.status,
                    message: resp.error_message(),
                }
            );

            tracing::info!(path = %model.path, "model created");
        }

        Ok(())
    }
}
