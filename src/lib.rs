//! Cyber Academy: gamified cybersecurity training
//!
//! A dashboard of training modules where you test password strength,
//! spot phishing emails, play with toy ciphers and defend a firewall
//! against waves of synthetic attacks.
//!
//! # Training Modules
//!
//! - **Password Fortress**: Score a password against seven criteria
//! - **Phishing Hunter**: Decide whether an email is safe or a scam
//! - **Crypto Lab**: Caesar, ROT13 and Base64 transforms
//! - **Firewall Defense**: Block incoming attacks before the shield breaks
//!
//! # Architecture
//!
//! - `data` - Reference data and entities: attacks, emails, modules, player
//! - `game` - The logic units and the `Academy` dashboard shell
//! - `config` - YAML configuration with sensible defaults
//! - `logging` - Tracing subscriber setup
//! - `cli` - Command line front end

pub mod cli;
pub mod config;
pub mod data;
pub mod game;
pub mod logging;

pub use config::AcademyConfig;
pub use data::*;
pub use game::Academy;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for application-level code
pub type Result<T> = anyhow::Result<T>;

/// Custom error types
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AcademyError {
    #[error("Invalid Base64")]
    InvalidBase64,

    #[error("Phishing case not found: {0}")]
    UnknownCase(usize),

    #[error("Unknown cipher method: {0}")]
    UnknownMethod(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Clipboard write failed: {0}")]
    Clipboard(String),
}
