use crate::config::block::ConfigBlock;
use crate::config::checks::check_duration;
use crate::config::duration::{DurationError, ParsedDuration, parse_duration};
use crate::config::errors::ConfigErrors;
use serde::{Deserialize, Serialize};

/// TURN 中继凭证配置
///
/// Read by the credential issuance layer, which hands relay URIs and
/// time-limited credentials to clients. Two credential modes exist: a
/// shared secret (coturn `static-auth-secret`) or a static
/// username/password pair.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct TurnConfig {
    /// How long issued credentials stay valid, e.g. "1h".
    ///
    /// Empty means the issuance layer picks its own lifetime.
    #[serde(rename = "turn_user_lifetime")]
    pub user_lifetime: String,

    /// TURN URIs passed to clients, in order.
    #[serde(rename = "turn_uris")]
    pub uris: Vec<String>,

    /// Shared secret from the TURN server (shared-secret mode).
    #[serde(rename = "turn_shared_secret")]
    pub shared_secret: String,

    /// Hardcoded username (static mode).
    #[serde(rename = "turn_username")]
    pub username: String,

    /// Hardcoded password (static mode).
    #[serde(rename = "turn_password")]
    pub password: String,
}

/// Credential mode implied by the configured fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnCredentialMode {
    /// Passwords are derived from `turn_shared_secret`.
    SharedSecret,
    /// `turn_username` / `turn_password` are handed out as-is.
    Static,
    /// Neither mode is fully configured.
    Unconfigured,
}

impl ConfigBlock for TurnConfig {
    fn defaults(&mut self) {
        *self = Self::default();
    }

    /// Only the lifetime syntax is checked; URIs and credentials are
    /// accepted as-is.
    fn verify(&self, errs: &mut ConfigErrors) {
        check_duration(errs, Self::USER_LIFETIME_KEY, &self.user_lifetime);
    }
}

impl TurnConfig {
    pub const USER_LIFETIME_KEY: &'static str = "client_api.turn.turn_user_lifetime";

    /// Whether any relay URI is configured.
    pub fn is_enabled(&self) -> bool {
        !self.uris.is_empty()
    }

    /// Parsed credential lifetime, `None` when unset.
    pub fn user_lifetime(&self) -> Result<Option<ParsedDuration>, DurationError> {
        if self.user_lifetime.is_empty() {
            return Ok(None);
        }
        parse_duration(&self.user_lifetime).map(Some)
    }

    /// 推断凭证模式
    ///
    /// A shared secret wins over static credentials. Static mode needs both
    /// the username and the password. Having both or neither configured is
    /// not a verification error.
    pub fn credential_mode(&self) -> TurnCredentialMode {
        if !self.shared_secret.is_empty() {
            TurnCredentialMode::SharedSecret
        } else if !self.username.is_empty() && !self.password.is_empty() {
            TurnCredentialMode::Static
        } else {
            TurnCredentialMode::Unconfigured
        }
    }
}
