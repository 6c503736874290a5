// ABOUTME: Minimal HTTP/1.1 plumbing shared by the engine and workload clients.
// ABOUTME: Exposes the Transport seam plus a hyper-based socket implementation.

mod message;
mod transport;

pub use message::{ApiRequest, ApiResponse};
pub use transport::{Endpoint, HttpTransport, Transport, TransportError};
