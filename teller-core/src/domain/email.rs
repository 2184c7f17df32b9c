//! Email identifier validation
//!
//! Account emails are checked with a deliberately small syntax rule rather
//! than full RFC 5322: one `@`, a plain local part, and a dotted domain.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::result::{Error, Result};

static PREFIX_ALPHANUMERIC: OnceLock<Regex> = OnceLock::new();
static PREFIX_DOT_UNDERSCORE: OnceLock<Regex> = OnceLock::new();
static DOMAIN: OnceLock<Regex> = OnceLock::new();

/// Which characters the local part (prefix) of an email may contain.
///
/// The domain rule is the same for both: ASCII letters, digits and `.`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmailRule {
    /// ASCII letters and digits only
    #[default]
    Alphanumeric,
    /// ASCII letters, digits, `.` and `_`
    DotUnderscore,
}

impl EmailRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmailRule::Alphanumeric => "alphanumeric",
            EmailRule::DotUnderscore => "dot-underscore",
        }
    }

    /// Parse a rule name as used in settings and environment variables
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "alphanumeric" | "alnum" => Some(EmailRule::Alphanumeric),
            "dot-underscore" | "dot_underscore" | "extended" => Some(EmailRule::DotUnderscore),
            _ => None,
        }
    }

    fn prefix_pattern(&self) -> &'static Regex {
        match self {
            EmailRule::Alphanumeric => PREFIX_ALPHANUMERIC
                .get_or_init(|| Regex::new(r"^[A-Za-z0-9]+$").unwrap()),
            EmailRule::DotUnderscore => PREFIX_DOT_UNDERSCORE
                .get_or_init(|| Regex::new(r"^[A-Za-z0-9._]+$").unwrap()),
        }
    }

    /// Check an email against this rule
    pub fn is_valid(&self, email: &str) -> bool {
        if email.is_empty() || email.chars().any(char::is_whitespace) {
            return false;
        }

        let Some((prefix, domain)) = email.split_once('@') else {
            return false;
        };
        if domain.contains('@') {
            return false;
        }

        if prefix.is_empty() || domain.is_empty() {
            return false;
        }
        if prefix.starts_with('.') || domain.ends_with('.') {
            return false;
        }
        if email.contains("..") {
            return false;
        }
        if !domain.contains('.') {
            return false;
        }

        let domain_pattern = DOMAIN.get_or_init(|| Regex::new(r"^[A-Za-z0-9.]+$").unwrap());
        self.prefix_pattern().is_match(prefix) && domain_pattern.is_match(domain)
    }
}

impl fmt::Display for EmailRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check an email under the default rule
pub fn is_email_valid(email: &str) -> bool {
    EmailRule::default().is_valid(email)
}

/// Same as [`is_email_valid`], with a missing email counting as invalid
pub fn is_email_valid_opt(email: Option<&str>) -> bool {
    email.is_some_and(is_email_valid)
}

/// A syntactically valid account email
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Parse under the default rule
    pub fn parse(email: impl Into<String>) -> Result<Self> {
        Self::parse_with(email, EmailRule::default())
    }

    /// Parse under an explicit rule
    pub fn parse_with(email: impl Into<String>, rule: EmailRule) -> Result<Self> {
        let email = email.into();
        if !rule.is_valid(&email) {
            return Err(Error::invalid_argument("Invalid email"));
        }
        Ok(Self(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part before `@`
    pub fn prefix(&self) -> &str {
        self.0.split_once('@').map_or("", |(prefix, _)| prefix)
    }

    /// The part after `@`
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map_or("", |(_, domain)| domain)
    }
}

impl TryFrom<String> for Email {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
