//! Homeserver 配置基础库
//!
//! Defaulting and verification of the homeserver's config blocks. Each block
//! is defaulted once, overlaid with operator input, then verified against a
//! shared [`ConfigErrors`] collector that reports every violation at once.

pub mod config;
pub mod error;

pub use config::{ConfigBlock, ConfigErrors, ServerConfig};
pub use error::{ConfigError, Result};
