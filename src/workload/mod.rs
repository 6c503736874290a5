// ABOUTME: Workload client for the API container brought up by compose.
// ABOUTME: Liveness polling and model seeding over plain HTTP.

mod client;
mod error;

pub use client::{MODELS_PATH, PING_PATH, WorkloadClient};
pub use error::WorkloadError;
