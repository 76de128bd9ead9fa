//! Client API 配置
//!
//! Settings read by the client-facing HTTP routes: listener addresses,
//! registration switches, CAPTCHA secrets and the embedded TURN block.

use crate::config::address::Address;
use crate::config::block::ConfigBlock;
use crate::config::checks::{RequiredWhen, check_not_empty};
use crate::config::errors::ConfigErrors;
use crate::config::turn::TurnConfig;
use serde::{Deserialize, Serialize};

/// Default listen/bind address of the client API.
pub const DEFAULT_CLIENT_API_ADDRESS: &str = "localhost:7771";

/// Client API 配置块
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ClientApiConfig {
    /// Address other components use to reach this API.
    pub listen: Address,

    /// Address the HTTP listener binds to.
    pub bind: Address,

    /// If set, allows registration by anyone who also has the shared
    /// secret, even if registration is otherwise disabled.
    pub registration_shared_secret: String,

    /// ReCAPTCHA public (site) key.
    pub recaptcha_public_key: String,

    /// ReCAPTCHA private key.
    pub recaptcha_private_key: String,

    /// Whether CAPTCHA is enabled and required for registration.
    #[serde(rename = "enable_registration_captcha")]
    pub recaptcha_enabled: bool,

    /// Secret used to bypass the CAPTCHA entirely. Never validated.
    #[serde(rename = "captcha_bypass_secret")]
    pub recaptcha_bypass_secret: String,

    /// Endpoint used to check whether a CAPTCHA response was successful.
    pub recaptcha_siteverify_api: String,

    /// Disables open registration (shared-secret registration still works).
    pub registration_disabled: bool,

    /// TURN 中继选项
    pub turn: TurnConfig,
}

/// How the registration endpoints should behave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationPolicy {
    /// Anyone may register.
    Open,
    /// Only callers holding `registration_shared_secret` may register.
    SharedSecretOnly,
    /// Registration is off.
    Closed,
}

impl Default for ClientApiConfig {
    fn default() -> Self {
        Self {
            listen: Address::from(DEFAULT_CLIENT_API_ADDRESS),
            bind: Address::from(DEFAULT_CLIENT_API_ADDRESS),
            registration_shared_secret: String::new(),
            recaptcha_public_key: String::new(),
            recaptcha_private_key: String::new(),
            recaptcha_enabled: false,
            recaptcha_bypass_secret: String::new(),
            recaptcha_siteverify_api: String::new(),
            registration_disabled: false,
            turn: TurnConfig::default(),
        }
    }
}

impl ConfigBlock for ClientApiConfig {
    fn defaults(&mut self) {
        *self = Self::default();
    }

    fn verify(&self, errs: &mut ConfigErrors) {
        check_not_empty(errs, "client_api.listen", self.listen.as_str());
        check_not_empty(errs, "client_api.bind", self.bind.as_str());
        self.recaptcha_rule().verify(errs);
        self.turn.verify(errs);
    }
}

impl ClientApiConfig {
    /// CAPTCHA keys become required once `enable_registration_captcha` is on.
    pub fn recaptcha_rule(&self) -> RequiredWhen<'_> {
        RequiredWhen::new(self.recaptcha_enabled)
            .field(
                "client_api.recaptcha_public_key",
                &self.recaptcha_public_key,
            )
            .field(
                "client_api.recaptcha_private_key",
                &self.recaptcha_private_key,
            )
            .field(
                "client_api.recaptcha_siteverify_api",
                &self.recaptcha_siteverify_api,
            )
    }

    /// 注册策略
    pub fn registration_policy(&self) -> RegistrationPolicy {
        match (
            self.registration_disabled,
            self.registration_shared_secret.is_empty(),
        ) {
            (false, _) => RegistrationPolicy::Open,
            (true, false) => RegistrationPolicy::SharedSecretOnly,
            (true, true) => RegistrationPolicy::Closed,
        }
    }
}
