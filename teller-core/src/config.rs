//! Configuration management
//!
//! Settings live in `settings.json` inside the teller directory:
//! ```json
//! {
//!   "account": { "withdrawPolicy": "strict", "emailRule": "alphanumeric" }
//! }
//! ```
//! Keys this crate does not manage are preserved when saving.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::result::{Error, Result};
use crate::domain::{AccountPolicy, EmailRule, WithdrawPolicy};

pub const SETTINGS_FILE: &str = "settings.json";
pub const WITHDRAW_POLICY_ENV: &str = "TELLER_WITHDRAW_POLICY";
pub const EMAIL_RULE_ENV: &str = "TELLER_EMAIL_RULE";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    account: AccountSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountSettings {
    #[serde(default)]
    withdraw_policy: WithdrawPolicy,
    #[serde(default)]
    email_rule: EmailRule,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Teller configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub withdraw_policy: WithdrawPolicy,
    pub email_rule: EmailRule,
}

impl Config {
    /// Load config from the teller directory
    ///
    /// Either setting can be overridden with `TELLER_WITHDRAW_POLICY` /
    /// `TELLER_EMAIL_RULE`. A missing or unreadable-as-JSON settings file
    /// means defaults.
    pub fn load(teller_dir: &Path) -> Result<Self> {
        Self::load_with_env(teller_dir, |key| std::env::var(key).ok())
    }

    /// Load config, resolving environment overrides through `env`
    pub fn load_with_env<F>(teller_dir: &Path, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw = read_settings(&teller_dir.join(SETTINGS_FILE))?;

        let withdraw_policy = match env(WITHDRAW_POLICY_ENV) {
            Some(value) => WithdrawPolicy::parse(&value).unwrap_or_else(|| {
                warn!(%value, "ignoring unknown {}", WITHDRAW_POLICY_ENV);
                raw.account.withdraw_policy
            }),
            None => raw.account.withdraw_policy,
        };

        let email_rule = match env(EMAIL_RULE_ENV) {
            Some(value) => EmailRule::parse(&value).unwrap_or_else(|| {
                warn!(%value, "ignoring unknown {}", EMAIL_RULE_ENV);
                raw.account.email_rule
            }),
            None => raw.account.email_rule,
        };

        Ok(Self {
            withdraw_policy,
            email_rule,
        })
    }

    /// Save config to the teller directory
    pub fn save(&self, teller_dir: &Path) -> Result<()> {
        let settings_path = teller_dir.join(SETTINGS_FILE);

        let mut settings = read_settings(&settings_path)?;
        settings.account.withdraw_policy = self.withdraw_policy;
        settings.account.email_rule = self.email_rule;

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }

    /// Update a setting by its key name (`withdraw-policy` or `email-rule`)
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "withdraw-policy" | "withdrawPolicy" => {
                self.withdraw_policy = WithdrawPolicy::parse(value)
                    .ok_or_else(|| Error::config(format!("Unknown withdraw policy: {}", value)))?;
            }
            "email-rule" | "emailRule" => {
                self.email_rule = EmailRule::parse(value)
                    .ok_or_else(|| Error::config(format!("Unknown email rule: {}", value)))?;
            }
            _ => return Err(Error::config(format!("Unknown setting: {}", key))),
        }
        Ok(())
    }

    /// The account policy these settings describe
    pub fn account_policy(&self) -> AccountPolicy {
        AccountPolicy::new(self.withdraw_policy, self.email_rule)
    }
}

fn read_settings(settings_path: &Path) -> Result<SettingsFile> {
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(settings_path)?;
    Ok(serde_json::from_str(&content).unwrap_or_else(|e| {
        warn!(path = %settings_path.display(), error = %e, "unparsable settings, using defaults");
        SettingsFile::default()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults_without_settings_file() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_with_env(dir.path(), no_env).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.account_policy(), AccountPolicy::default());
    }

    #[test]
    fn test_reads_settings_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILE),
            r#"{"account": {"withdrawPolicy": "zero-tolerant", "emailRule": "dot-underscore"}}"#,
        )
        .unwrap();

        let config = Config::load_with_env(dir.path(), no_env).unwrap();
        assert_eq!(config.withdraw_policy, WithdrawPolicy::ZeroTolerant);
        assert_eq!(config.email_rule, EmailRule::DotUnderscore);
    }

    #[test]
    fn test_garbage_settings_fall_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILE), "not json").unwrap();
        let config = Config::load_with_env(dir.path(), no_env).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILE),
            r#"{"account": {"withdrawPolicy": "zero-tolerant"}}"#,
        )
        .unwrap();

        let config = Config::load_with_env(dir.path(), |key| match key {
            WITHDRAW_POLICY_ENV => Some("strict".to_string()),
            EMAIL_RULE_ENV => Some("bogus".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.withdraw_policy, WithdrawPolicy::Strict);
        assert_eq!(config.email_rule, EmailRule::Alphanumeric);
    }

    #[test]
    fn test_save_preserves_unmanaged_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, r#"{"theme": "dark", "account": {"note": "keep"}}"#).unwrap();

        let mut config = Config::load_with_env(dir.path(), no_env).unwrap();
        config.set("withdraw-policy", "zero-tolerant").unwrap();
        config.save(dir.path()).unwrap();

        let saved: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["theme"], "dark");
        assert_eq!(saved["account"]["note"], "keep");
        assert_eq!(saved["account"]["withdrawPolicy"], "zero-tolerant");

        let reloaded = Config::load_with_env(dir.path(), no_env).unwrap();
        assert_eq!(reloaded.withdraw_policy, WithdrawPolicy::ZeroTolerant);
    }

    #[test]
    fn test_set_rejects_unknown() {
        let mut config = Config::default();
        assert!(config.set("color", "blue").is_err());
        assert!(config.set("email-rule", "anything").is_err());
        config.set("emailRule", "dot-underscore").unwrap();
        assert_eq!(config.email_rule, EmailRule::DotUnderscore);
    }
}
