//! 日志配置
//!
//! Consumed by the binary when it installs the `tracing` subscriber.

use crate::config::block::ConfigBlock;
use crate::config::checks::{RequiredWhen, check_one_of};
use crate::config::errors::ConfigErrors;
use serde::{Deserialize, Serialize};

const FILTER_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const LOG_OUTPUTS: &[&str] = &["console", "file"];

/// 可观测性配置
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// 过滤级别
    ///
    /// EnvFilter syntax, e.g. "info,homeserver_common=debug". `RUST_LOG`
    /// takes precedence when set.
    pub filter_level: String,

    pub log: LogConfig,
}

/// 日志配置
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    /// 日志输出目标: "console" (default) or "file".
    pub output: String,

    /// Rotate the log file daily. Only used when `output = "file"`.
    pub rotate: bool,

    /// Log directory. Only used when `output = "file"`.
    pub path: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            filter_level: "info".to_string(),
            log: LogConfig::default(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            output: "console".to_string(),
            rotate: false,
            path: "logs/".to_string(),
        }
    }
}

impl ConfigBlock for ObservabilityConfig {
    fn defaults(&mut self) {
        *self = Self::default();
    }

    fn verify(&self, errs: &mut ConfigErrors) {
        check_one_of(
            errs,
            "observability.filter_level",
            self.main_level(),
            FILTER_LEVELS,
        );
        check_one_of(errs, "observability.log.output", &self.log.output, LOG_OUTPUTS);
        RequiredWhen::new(self.is_file_logging())
            .field("observability.log.path", &self.log.path)
            .verify(errs);
    }
}

impl ObservabilityConfig {
    /// Leading directive of `filter_level` ("info" for "info,hyper=warn").
    pub fn main_level(&self) -> &str {
        self.filter_level.split(',').next().unwrap_or("").trim()
    }

    pub fn is_console_logging(&self) -> bool {
        self.log.output == "console"
    }

    pub fn is_file_logging(&self) -> bool {
        self.log.output == "file"
    }

    /// 是否按天轮转日志
    pub fn should_rotate_logs(&self) -> bool {
        self.is_file_logging() && self.log.rotate
    }
}
