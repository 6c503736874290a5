// ABOUTME: Shared test utilities for integration tests.
// ABOUTME: Scripted engine transport, recording progress sink and a fake HTTP server.

#![allow(dead_code)]

pub mod fake_server;
pub mod scripted;

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
///
/// Set `RUST_LOG=apiruns=debug` to see request-level logs.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("apiruns=warn"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .init();
    });
}
