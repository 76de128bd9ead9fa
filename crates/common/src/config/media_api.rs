use crate::config::address::Address;
use crate::config::block::ConfigBlock;
use crate::config::checks::check_not_empty;
use crate::config::errors::ConfigErrors;
use serde::{Deserialize, Serialize};

/// Default listen/bind address of the media API.
pub const DEFAULT_MEDIA_API_ADDRESS: &str = "localhost:7774";

/// Media API 配置块
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct MediaApiConfig {
    pub listen: Address,
    pub bind: Address,
}

impl Default for MediaApiConfig {
    fn default() -> Self {
        Self {
            listen: Address::from(DEFAULT_MEDIA_API_ADDRESS),
            bind: Address::from(DEFAULT_MEDIA_API_ADDRESS),
        }
    }
}

impl ConfigBlock for MediaApiConfig {
    fn defaults(&mut self) {
        *self = Self::default();
    }

    fn verify(&self, errs: &mut ConfigErrors) {
        check_not_empty(errs, "media_api.listen", self.listen.as_str());
        check_not_empty(errs, "media_api.bind", self.bind.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_media_api_config() {
        let config = MediaApiConfig::default();
        assert_eq!(config.listen.as_str(), "localhost:7774");
        assert_eq!(config.bind.as_str(), "localhost:7774");

        let mut errs = ConfigErrors::new();
        config.verify(&mut errs);
        assert!(errs.is_empty());
    }

    #[test]
    fn test_missing_addresses() {
        let config = MediaApiConfig {
            listen: Address::default(),
            bind: Address::default(),
        };
        let mut errs = ConfigErrors::new();
        config.verify(&mut errs);
        assert_eq!(
            errs.messages(),
            [
                "missing config key \"media_api.listen\"",
                "missing config key \"media_api.bind\"",
            ]
        );
    }
}
