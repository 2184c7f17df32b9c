//! CLI command implementations

pub mod check;
pub mod config;
pub mod simulate;
pub mod transfer;

use std::path::PathBuf;

use anyhow::{Context, Result};
use teller_core::{AccountPolicy, Config, EmailRule, WithdrawPolicy};

/// Policy settings given on the command line
#[derive(Debug, Default, Clone, Copy)]
pub struct PolicyOverrides {
    pub withdraw_policy: Option<WithdrawPolicy>,
    pub email_rule: Option<EmailRule>,
}

/// Get the teller directory from environment or default
pub fn get_teller_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("TELLER_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".teller"))
        .context("Could not find home directory")
}

/// Load settings and apply command-line overrides on top
pub fn get_policy(overrides: &PolicyOverrides) -> Result<AccountPolicy> {
    let teller_dir = get_teller_dir()?;
    let config = Config::load(&teller_dir)
        .with_context(|| format!("Failed to load settings from {:?}", teller_dir))?;
    Ok(apply_overrides(config.account_policy(), overrides))
}

fn apply_overrides(mut policy: AccountPolicy, overrides: &PolicyOverrides) -> AccountPolicy {
    if let Some(withdraw_policy) = overrides.withdraw_policy {
        policy = policy.with_withdraw_policy(withdraw_policy);
    }
    if let Some(email_rule) = overrides.email_rule {
        policy = policy.with_email_rule(email_rule);
    }
    policy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_win_over_settings() {
        let settings = AccountPolicy::new(WithdrawPolicy::ZeroTolerant, EmailRule::DotUnderscore);

        let unchanged = apply_overrides(settings, &PolicyOverrides::default());
        assert_eq!(unchanged, settings);

        let overridden = apply_overrides(
            settings,
            &PolicyOverrides {
                withdraw_policy: Some(WithdrawPolicy::Strict),
                email_rule: None,
            },
        );
        assert_eq!(overridden.withdraw_policy, WithdrawPolicy::Strict);
        assert_eq!(overridden.email_rule, EmailRule::DotUnderscore);
    }
}
