//! Teller Core - a validated in-memory monetary account
//!
//! - **domain**: the `Account` entity plus the pure email and amount
//!   validators it is built on
//! - **config**: `settings.json` handling for the account policy

pub mod config;
pub mod domain;

// Re-export commonly used types at crate root
pub use config::Config;
pub use domain::result::{Error, OperationResult, Result};
pub use domain::{
    is_amount_valid, is_amount_valid_f64, is_email_valid, is_email_valid_opt, Account,
    AccountPolicy, Email, EmailRule, WithdrawPolicy,
};
