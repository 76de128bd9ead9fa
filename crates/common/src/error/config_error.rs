//! 配置相关错误类型
//!
//! 定义所有与配置加载、解析、验证相关的错误

use crate::config::ConfigErrors;
use thiserror::Error;

/// 配置相关错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Path is not a valid file: {path}")]
    NotAFile { path: String },

    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Configuration verification failed: {0}")]
    Verification(ConfigErrors),
}

impl ConfigError {
    /// Violations collected by a failed verification pass, if any.
    pub fn violations(&self) -> Option<&ConfigErrors> {
        match self {
            Self::Verification(errs) => Some(errs),
            _ => None,
        }
    }
}

/// 配置操作的 Result 类型
pub type Result<T> = std::result::Result<T, ConfigError>;
