// ABOUTME: Library root for apiruns - exposes the engine client, orchestrator and collaborators.
// ABOUTME: The main binary is in main.rs.

pub mod config;
pub mod engine;
pub mod error;
pub mod http;
pub mod orchestrate;
pub mod output;
pub mod types;
pub mod workload;
