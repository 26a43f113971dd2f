//! Rule-based prompt handling for credential-less deployments

pub mod calc;
pub mod compose;
pub mod engine;
pub mod intent;

// Re-export the engine and classifier types for convenience
pub use engine::RuleEngine;
pub use intent::Intent;
