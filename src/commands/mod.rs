// ABOUTME: Command module aggregator for the apiruns CLI.
// ABOUTME: Re-exports build, up and down command handlers.

mod build;
mod down;
mod engine_connection;
mod up;

pub use build::build;
pub use down::down;
pub use up::up;
