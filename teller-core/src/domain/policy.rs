//! Account behavior policies

use std::fmt;

use serde::{Deserialize, Serialize};

use super::email::EmailRule;

/// How withdrawals (and over-balance transfers) are judged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WithdrawPolicy {
    /// Zero is rejected; overdrawing is `InsufficientFunds`
    #[default]
    Strict,
    /// Zero is a no-op; overdrawing is `InvalidArgument`
    ZeroTolerant,
}

impl WithdrawPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            WithdrawPolicy::Strict => "strict",
            WithdrawPolicy::ZeroTolerant => "zero-tolerant",
        }
    }

    /// Parse a policy name as used in settings and environment variables
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "strict" => Some(WithdrawPolicy::Strict),
            "zero-tolerant" | "zero_tolerant" | "lenient" => Some(WithdrawPolicy::ZeroTolerant),
            _ => None,
        }
    }

    /// Whether overdrawing surfaces as a distinct insufficient-funds error
    pub fn distinguishes_insufficient_funds(&self) -> bool {
        matches!(self, WithdrawPolicy::Strict)
    }
}

impl fmt::Display for WithdrawPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Policy fixed on an account at construction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountPolicy {
    #[serde(default)]
    pub withdraw_policy: WithdrawPolicy,
    #[serde(default)]
    pub email_rule: EmailRule,
}

impl AccountPolicy {
    pub fn new(withdraw_policy: WithdrawPolicy, email_rule: EmailRule) -> Self {
        Self {
            withdraw_policy,
            email_rule,
        }
    }

    pub fn with_withdraw_policy(mut self, withdraw_policy: WithdrawPolicy) -> Self {
        self.withdraw_policy = withdraw_policy;
        self
    }

    pub fn with_email_rule(mut self, email_rule: EmailRule) -> Self {
        self.email_rule = email_rule;
        self
    }
}
