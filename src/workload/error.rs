// ABOUTME: Workload client error types with SNAFU pattern.
// ABOUTME: Liveness timeout, model rejection and transport failures against the API container.

use crate::http::TransportError;
use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum WorkloadError {
    #[snafu(display("API did not become live after {attempts} attempts"))]
    NotLive { attempts: u32 },

    #[snafu(display("API rejected model {path} with status {status}: {message}"))]
    ModelRejected {
        path: String,
        status: u16,
        message: String,
    },

    #[snafu(display("request to API failed: {source}"))]
    Request { source: TransportError },
}
