//! 统一错误处理模型
//!
//! 提供主程序的顶层错误类型

use thiserror::Error;

/// 主程序的统一错误枚举
#[derive(Debug, Error)]
pub enum Error {
    /// 配置加载或验证错误
    #[error("Configuration error: {0}")]
    Config(#[from] homeserver_common::ConfigError),

    /// I/O 操作错误
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// 配置验证失败
    #[error("Configuration validation failed: {message}")]
    ServiceValidation { message: String },

    /// Anyhow 错误兼容层
    #[error("{0:#}")]
    Anyhow(#[from] anyhow::Error),

    /// 自定义错误消息
    #[error("Application error: {message}")]
    Custom { message: String },
}

/// 统一的 Result 类型
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// 创建自定义错误
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom {
            message: message.into(),
        }
    }

    /// 创建配置验证失败错误
    pub fn service_validation(message: impl Into<String>) -> Self {
        Self::ServiceValidation {
            message: message.into(),
        }
    }
}
