//! Core domain entities
//!
//! The validation rules are free functions so they can be used (and tested)
//! without an account. No I/O happens here.

mod account;
pub mod amount;
pub mod email;
pub mod policy;
pub mod result;

pub use account::Account;
pub use amount::{is_amount_valid, is_amount_valid_f64};
pub use email::{is_email_valid, is_email_valid_opt, Email, EmailRule};
pub use policy::{AccountPolicy, WithdrawPolicy};
