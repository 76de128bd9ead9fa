//! 通用配置检查
//!
//! Small predicates shared by every config block. None of them fail as a
//! function call: a violation is appended to the [`ConfigErrors`] collector
//! and the caller moves on to its next check.

use crate::config::duration::parse_duration;
use crate::config::errors::ConfigErrors;

/// Record a violation if a required value is empty.
pub fn check_not_empty(errs: &mut ConfigErrors, key: &str, value: &str) {
    if value.is_empty() {
        errs.add(format!("missing config key {key:?}"));
    }
}

/// Record a violation if a non-empty value is not a valid duration
/// expression. An empty value means the field was left unset.
pub fn check_duration(errs: &mut ConfigErrors, key: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    if parse_duration(value).is_err() {
        errs.add(format!("invalid duration for config key {key:?}: {value}"));
    }
}

/// Record a violation if `value` is not one of `allowed`.
pub fn check_one_of(errs: &mut ConfigErrors, key: &str, value: &str, allowed: &[&str]) {
    if !allowed.contains(&value) {
        errs.add(format!(
            "invalid value for config key {key:?}: {value} (expected one of: {})",
            allowed.join(", ")
        ));
    }
}

/// A set of fields that become required once a feature flag is on.
///
/// ```
/// use homeserver_common::config::{ConfigErrors, RequiredWhen};
///
/// let mut errs = ConfigErrors::new();
/// RequiredWhen::new(true)
///     .field("feature.key", "")
///     .field("feature.url", "https://example.org")
///     .verify(&mut errs);
/// assert_eq!(errs.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct RequiredWhen<'a> {
    enabled: bool,
    fields: Vec<(&'static str, &'a str)>,
}

impl<'a> RequiredWhen<'a> {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            fields: Vec::new(),
        }
    }

    /// Add a `(key, value)` pair gated by this rule.
    pub fn field(mut self, key: &'static str, value: &'a str) -> Self {
        self.fields.push((key, value));
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// 被该规则约束的配置键
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(key, _)| *key)
    }

    /// Run [`check_not_empty`] on every gated field when the flag is on.
    pub fn verify(&self, errs: &mut ConfigErrors) {
        if !self.enabled {
            return;
        }
        for (key, value) in &self.fields {
            check_not_empty(errs, key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_not_empty() {
        let mut errs = ConfigErrors::new();
        check_not_empty(&mut errs, "client_api.listen", "localhost:7771");
        assert!(errs.is_empty());

        check_not_empty(&mut errs, "client_api.listen", "");
        assert_eq!(errs.messages(), ["missing config key \"client_api.listen\""]);
    }

    #[test]
    fn test_check_duration_accepts_empty_and_valid() {
        let mut errs = ConfigErrors::new();
        for value in ["", "1h", "30m", "500ms", "0", "-5s", "1h30m"] {
            check_duration(&mut errs, "some.lifetime", value);
        }
        assert!(errs.is_empty(), "unexpected errors: {errs}");
    }

    #[test]
    fn test_check_duration_rejects_invalid() {
        let mut errs = ConfigErrors::new();
        check_duration(&mut errs, "some.lifetime", "abc");
        check_duration(&mut errs, "some.lifetime", "1hour");

        assert_eq!(
            errs.messages(),
            [
                "invalid duration for config key \"some.lifetime\": abc",
                "invalid duration for config key \"some.lifetime\": 1hour",
            ]
        );
    }

    #[test]
    fn test_check_one_of() {
        let mut errs = ConfigErrors::new();
        check_one_of(&mut errs, "log.output", "file", &["console", "file"]);
        assert!(errs.is_empty());

        check_one_of(&mut errs, "log.output", "syslog", &["console", "file"]);
        assert_eq!(
            errs.messages(),
            ["invalid value for config key \"log.output\": syslog (expected one of: console, file)"]
        );
    }

    #[test]
    fn test_required_when_disabled_is_silent() {
        let mut errs = ConfigErrors::new();
        let rule = RequiredWhen::new(false).field("a", "").field("b", "");
        rule.verify(&mut errs);
        assert!(errs.is_empty());
        assert_eq!(rule.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_required_when_enabled_checks_every_field() {
        let mut errs = ConfigErrors::new();
        RequiredWhen::new(true)
            .field("a", "")
            .field("b", "set")
            .field("c", "")
            .verify(&mut errs);

        assert_eq!(
            errs.messages(),
            ["missing config key \"a\"", "missing config key \"c\""]
        );
    }
}
