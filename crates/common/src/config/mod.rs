//! 统一配置管理系统
//!
//! Every config block follows the same lifecycle: defaults at construction,
//! operator overlay, one verification pass, then read-only use. All blocks
//! of a [`ServerConfig`] are verified against a single [`ConfigErrors`]
//! collector so that one run reports every problem.

pub mod address;
pub mod block;
pub mod checks;
pub mod client_api;
pub mod duration;
pub mod errors;
pub mod media_api;
pub mod observability;
pub mod turn;

pub use crate::config::address::Address;
pub use crate::config::block::ConfigBlock;
pub use crate::config::checks::{RequiredWhen, check_duration, check_not_empty, check_one_of};
pub use crate::config::client_api::{ClientApiConfig, RegistrationPolicy};
pub use crate::config::duration::{DurationError, ParsedDuration, parse_duration};
pub use crate::config::errors::ConfigErrors;
pub use crate::config::media_api::MediaApiConfig;
pub use crate::config::observability::{LogConfig, ObservabilityConfig};
pub use crate::config::turn::{TurnConfig, TurnCredentialMode};

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// Homeserver 主配置
///
/// Owns every config block by value. Loaded from TOML: missing sections
/// and keys keep their default values.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Client API 配置
    pub client_api: ClientApiConfig,

    /// Media API 配置
    pub media_api: MediaApiConfig,

    /// 可观测性配置
    pub observability: ObservabilityConfig,
}

impl ConfigBlock for ServerConfig {
    fn defaults(&mut self) {
        self.client_api.defaults();
        self.media_api.defaults();
        self.observability.defaults();
    }

    fn verify(&self, errs: &mut ConfigErrors) {
        self.client_api.verify(errs);
        self.media_api.verify(errs);
        self.observability.verify(errs);
    }
}

impl ServerConfig {
    /// 从 TOML 字符串加载配置（未验证）
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// 从文件加载配置（未验证）
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(ConfigError::FileNotFound {
                path: path_ref.display().to_string(),
            });
        }
        if !path_ref.is_file() {
            return Err(ConfigError::NotAFile {
                path: path_ref.display().to_string(),
            });
        }

        debug!(path = %path_ref.display(), "reading configuration file");
        let content = std::fs::read_to_string(path_ref)?;
        Self::from_toml(&content)
    }

    /// 将配置序列化为 TOML 字符串
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Verify every block with one collector and flush it.
    pub fn verify_all(&self) -> Result<()> {
        let mut errs = ConfigErrors::new();
        self.verify(&mut errs);
        if !errs.is_empty() {
            warn!(count = errs.len(), "configuration verification failed");
        }
        errs.into_result()
    }
}
