//! Parley - a chat relay with a rule-based fallback responder.
//!
//! The service exposes `POST /chat`. With an `OPENAI_API_KEY` configured it
//! relays the conversation to the chat-completions API; without one, a
//! deterministic rule engine answers locally, pulling live data from public
//! REST sources (Wikipedia, Reddit, Yahoo Finance, Nominatim, OpenLibrary).
//! Every other path serves static files.
//!
//! # Architecture
//!
//! The system uses:
//! - axum for the HTTP server
//! - openai-api-rs for the provider branch
//! - reqwest for the fallback data sources
//! - Tokio for the async runtime
//!
//! # Example
//!
//! ```no_run
//! use parley::core::AppConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Set up structured logging
//!     parley::setup_logging();
//!
//!     let config = AppConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;
//!     parley::server::run(config).await
//! }
//! ```

// Module declarations
pub mod ai;
pub mod core;
pub mod errors;
pub mod rules;
pub mod server;
pub mod sources;
pub mod utils;

/// Configure structured logging for the server process.
///
/// Sets up tracing-subscriber with a fmt layer and an `EnvFilter` that
/// defaults to `info` and honors `RUST_LOG`. Call once from `main` before
/// serving.
///
/// # Example
///
/// ```
/// // Initialize structured logging at process start
/// parley::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}
