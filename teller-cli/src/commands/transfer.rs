//! Transfer command - move money between two freshly opened accounts

use std::str::FromStr;

use anyhow::{anyhow, Result};
use colored::Colorize;
use rust_decimal::Decimal;
use serde::Serialize;

use teller_core::domain::amount::parse_amount;
use teller_core::{Account, AccountPolicy, OperationResult};

use super::{get_policy, PolicyOverrides};
use crate::output;

/// An `EMAIL=BALANCE` argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountArg {
    pub email: String,
    pub balance: Decimal,
}

impl FromStr for AccountArg {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (email, balance) = s
            .rsplit_once('=')
            .ok_or_else(|| anyhow!("Invalid account '{}': expected EMAIL=BALANCE", s))?;
        Ok(Self {
            email: email.trim().to_string(),
            balance: parse_amount(balance)?,
        })
    }
}

impl AccountArg {
    fn open(&self, policy: AccountPolicy) -> Result<Account> {
        Ok(Account::with_policy(&self.email, self.balance, policy)?)
    }
}

#[derive(Debug, Serialize)]
struct TransferReport {
    amount: Decimal,
    from: Account,
    to: Account,
}

pub fn run(from: &str, to: &str, amount: &str, json: bool, overrides: &PolicyOverrides) -> Result<()> {
    let policy = get_policy(overrides)?;

    let mut source = from.parse::<AccountArg>()?.open(policy)?;
    let mut target = to.parse::<AccountArg>()?.open(policy)?;
    let amount = parse_amount(amount)?;

    let result = source.transfer(&mut target, amount);

    if json {
        let report = TransferReport {
            amount,
            from: source,
            to: target,
        };
        let envelope = match &result {
            Ok(()) => OperationResult::ok(report),
            Err(e) => OperationResult::fail_with(e, Some(report)),
        };
        output::print_json(&envelope)?;
        return result.map_err(Into::into);
    }

    result?;

    println!("{}", "Transfer complete".green());
    let mut table = output::create_table();
    table.set_header(vec!["Account", "Balance"]);
    table.add_row(vec![source.email().to_string(), output::format_money(source.balance())]);
    table.add_row(vec![target.email().to_string(), output::format_money(target.balance())]);
    println!("{}", table);

    Ok(())
}
