//! Configuration and shared request/response models

pub mod config;
pub mod models;

// Re-export main types for convenience
pub use config::AppConfig;
pub use models::{ChatMessage, ChatReply, ChatRequest};
