// Module declarations
pub mod chat;
pub mod config;
pub mod models;
pub mod session;
pub mod shutdown;
pub mod walkthrough;

// Server module (HTTP API)
pub mod server;

// Re-export models for use in handlers and tests
pub use models::*;
