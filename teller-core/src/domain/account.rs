//! Account domain model

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

use super::amount::{self, amount_from_f64, has_cent_precision, is_amount_valid, MAX_DECIMAL_PLACES};
use super::email::Email;
use super::policy::{AccountPolicy, WithdrawPolicy};
use super::result::{Error, Result};

/// A single in-memory account identified by email
///
/// The balance is never negative and never carries more than two decimal
/// places. It only changes through [`deposit`](Self::deposit),
/// [`withdraw`](Self::withdraw) and [`transfer`](Self::transfer), and every
/// one of them validates before touching it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    email: Email,
    balance: Decimal,
    policy: AccountPolicy,
}

impl Account {
    /// Open an account under the default policy
    pub fn new(email: &str, starting_balance: Decimal) -> Result<Self> {
        Self::with_policy(email, starting_balance, AccountPolicy::default())
    }

    /// Open an account under an explicit policy
    ///
    /// The starting balance must itself be a valid amount, so zero is
    /// rejected under every policy.
    pub fn with_policy(email: &str, starting_balance: Decimal, policy: AccountPolicy) -> Result<Self> {
        let email = Email::parse_with(email, policy.email_rule)?;
        if !is_amount_valid(starting_balance) {
            return Err(Error::invalid_argument("Invalid starting balance"));
        }

        debug!(email = %email, balance = %starting_balance, "account opened");

        Ok(Self {
            email,
            balance: starting_balance.round_dp(MAX_DECIMAL_PLACES),
            policy,
        })
    }

    /// Open an account from a float starting balance
    pub fn from_f64(email: &str, starting_balance: f64, policy: AccountPolicy) -> Result<Self> {
        let balance = amount_from_f64(starting_balance)
            .map_err(|_| Error::invalid_argument("Invalid starting balance"))?;
        Self::with_policy(email, balance, policy)
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn balance_f64(&self) -> f64 {
        self.balance.to_f64().unwrap_or(0.0)
    }

    /// Balance in cents; `None` only if it does not fit in an `i64`
    pub fn balance_cents(&self) -> Option<i64> {
        amount::to_cents(self.balance)
    }

    pub fn policy(&self) -> AccountPolicy {
        self.policy
    }

    /// Withdraw money from the account
    ///
    /// Under [`WithdrawPolicy::Strict`] zero is rejected and overdrawing is
    /// [`Error::InsufficientFunds`]. Under [`WithdrawPolicy::ZeroTolerant`]
    /// zero is a no-op and overdrawing is [`Error::InvalidArgument`].
    pub fn withdraw(&mut self, amount: Decimal) -> Result<()> {
        match self.policy.withdraw_policy {
            WithdrawPolicy::Strict => {
                if !is_amount_valid(amount) {
                    return Err(self.reject("withdraw", amount, "Invalid amount"));
                }
            }
            WithdrawPolicy::ZeroTolerant => {
                if amount.is_zero() {
                    debug!(email = %self.email, "zero withdrawal ignored");
                    return Ok(());
                }
                if amount.is_sign_negative() || !has_cent_precision(amount) {
                    return Err(self.reject("withdraw", amount, "Invalid amount"));
                }
            }
        }

        let amount = amount.round_dp(MAX_DECIMAL_PLACES);
        if amount > self.balance {
            return Err(self.overdraw("withdraw", amount));
        }

        self.balance -= amount;
        debug!(email = %self.email, %amount, balance = %self.balance, "withdrawal applied");
        Ok(())
    }

    /// Deposit money into the account
    ///
    /// Zero is rejected regardless of policy.
    pub fn deposit(&mut self, amount: Decimal) -> Result<()> {
        if !is_amount_valid(amount) {
            return Err(self.reject("deposit", amount, "Invalid deposit amount"));
        }

        let amount = amount.round_dp(MAX_DECIMAL_PLACES);
        let balance = credit(self.balance, amount)
            .ok_or_else(|| self.reject("deposit", amount, "Deposit would overflow the balance"))?;

        self.balance = balance;
        debug!(email = %self.email, %amount, balance = %self.balance, "deposit applied");
        Ok(())
    }

    /// Transfer money to another account
    ///
    /// Both balances are computed before either is written, so a failure
    /// leaves both accounts untouched. This account's policy decides how an
    /// overdraw is reported.
    pub fn transfer(&mut self, target: &mut Account, amount: Decimal) -> Result<()> {
        if !is_amount_valid(amount) {
            return Err(self.reject("transfer", amount, "Invalid transfer amount"));
        }
        let amount = amount.round_dp(MAX_DECIMAL_PLACES);
        if amount > self.balance {
            return Err(self.overdraw("transfer", amount));
        }

        let target_balance = credit(target.balance, amount)
            .ok_or_else(|| self.reject("transfer", amount, "Transfer would overflow the target balance"))?;
        let source_balance = self.balance - amount;

        self.balance = source_balance;
        target.balance = target_balance;

        debug!(
            from = %self.email,
            to = %target.email,
            %amount,
            from_balance = %self.balance,
            to_balance = %target.balance,
            "transfer applied"
        );
        Ok(())
    }

    /// [`deposit`](Self::deposit) for callers holding a float amount
    pub fn deposit_f64(&mut self, amount: f64) -> Result<()> {
        self.deposit(amount_from_f64(amount)?)
    }

    /// [`withdraw`](Self::withdraw) for callers holding a float amount
    pub fn withdraw_f64(&mut self, amount: f64) -> Result<()> {
        if amount == 0.0 {
            return self.withdraw(Decimal::ZERO);
        }
        self.withdraw(amount_from_f64(amount)?)
    }

    /// [`transfer`](Self::transfer) for callers holding a float amount
    pub fn transfer_f64(&mut self, target: &mut Account, amount: f64) -> Result<()> {
        self.transfer(target, amount_from_f64(amount)?)
    }

    fn reject(&self, operation: &'static str, amount: Decimal, reason: &str) -> Error {
        info!(email = %self.email, operation, %amount, reason, "operation rejected");
        Error::invalid_argument(reason)
    }

    fn overdraw(&self, operation: &'static str, amount: Decimal) -> Error {
        info!(
            email = %self.email,
            operation,
            %amount,
            balance = %self.balance,
            "operation rejected: insufficient funds"
        );
        if self.policy.withdraw_policy.distinguishes_insufficient_funds() {
            Error::insufficient_funds(amount, self.balance)
        } else {
            Error::invalid_argument(format!(
                "Insufficient funds: requested {}, available {}",
                amount, self.balance
            ))
        }
    }
}

/// Exact `balance + amount`, or `None` if the sum cannot be held to the cent
///
/// `Decimal` silently drops scale once a sum needs more than 28 significant
/// digits, so a successful `checked_add` is not enough on its own.
fn credit(balance: Decimal, amount: Decimal) -> Option<Decimal> {
    let sum = balance.checked_add(amount)?;
    let exact = sum.scale() >= balance.scale().max(amount.scale())
        && sum.checked_sub(amount) == Some(balance);
    exact.then_some(sum)
}
