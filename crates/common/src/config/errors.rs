//! 配置验证错误收集器
//!
//! Every config block appends its violations here during one verification
//! pass. Nothing is reported until the owner flushes the collector.

use crate::error::ConfigError;
use std::fmt;
use tracing::debug;

/// Ordered collection of human-readable verification failures.
///
/// Shared by `&mut` across all blocks verified in the same startup pass.
/// Messages are kept in insertion order and never deduplicated.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigErrors {
    messages: Vec<String>,
}

impl ConfigErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one violation.
    pub fn add(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!(%message, "config violation recorded");
        self.messages.push(message);
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }

    /// 以切片形式返回全部错误信息
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Flush the collector as a single failure.
    ///
    /// Returns `Ok(())` when nothing was recorded, otherwise one
    /// [`ConfigError::Verification`] carrying every message.
    pub fn into_result(self) -> Result<(), ConfigError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Verification(self))
        }
    }
}

impl fmt::Display for ConfigErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} configuration error(s)", self.messages.len())?;
        for message in &self.messages {
            write!(f, "\n  - {message}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ConfigErrors {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
