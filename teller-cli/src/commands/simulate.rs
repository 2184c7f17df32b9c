//! Simulate command - apply a sequence of operations to one account

use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Result};
use colored::Colorize;
use rust_decimal::Decimal;
use serde::Serialize;

use teller_core::domain::amount::parse_amount;
use teller_core::{Account, Error, OperationResult};

use super::{get_policy, PolicyOverrides};
use crate::output;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OpKind {
    Deposit,
    Withdraw,
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpKind::Deposit => f.write_str("deposit"),
            OpKind::Withdraw => f.write_str("withdraw"),
        }
    }
}

/// One `deposit=<amount>` / `withdraw=<amount>` argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Op {
    pub kind: OpKind,
    pub amount: Decimal,
}

impl FromStr for Op {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let Some((kind, amount)) = s.split_once('=') else {
            bail!("Invalid operation '{}': expected deposit=<amount> or withdraw=<amount>", s);
        };
        let kind = match kind.trim().to_lowercase().as_str() {
            "deposit" | "d" => OpKind::Deposit,
            "withdraw" | "w" => OpKind::Withdraw,
            other => bail!("Unknown operation '{}'", other),
        };
        Ok(Self {
            kind,
            amount: parse_amount(amount)?,
        })
    }
}

#[derive(Debug, Serialize)]
struct StepResult {
    step: usize,
    operation: OpKind,
    amount: Decimal,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    balance: Decimal,
}

#[derive(Debug, Serialize)]
struct SimulationReport {
    account: Account,
    starting_balance: Decimal,
    steps: Vec<StepResult>,
}

pub fn run(
    email: &str,
    balance: &str,
    ops: &[String],
    keep_going: bool,
    json: bool,
    overrides: &PolicyOverrides,
) -> Result<()> {
    let policy = get_policy(overrides)?;
    let ops = ops.iter().map(|op| op.parse::<Op>()).collect::<Result<Vec<_>>>()?;

    let mut account = Account::with_policy(email, parse_amount(balance)?, policy)?;
    let starting_balance = account.balance();

    let (steps, first_error) = apply(&mut account, &ops, keep_going);
    let failed = steps.iter().filter(|s| !s.ok).count();

    let report = SimulationReport {
        account,
        starting_balance,
        steps,
    };

    if json {
        let envelope = match &first_error {
            None => OperationResult::ok(report),
            Some(err) => OperationResult::fail_with(err, Some(report)),
        };
        output::print_json(&envelope)?;
    } else {
        print_report(&report);
    }

    match first_error {
        None => Ok(()),
        Some(err) if failed == 1 => bail!("1 operation failed: {}", err),
        Some(err) => bail!("{} operations failed, first: {}", failed, err),
    }
}

/// Apply ops in order; stops at the first failure unless `keep_going`
fn apply(account: &mut Account, ops: &[Op], keep_going: bool) -> (Vec<StepResult>, Option<Error>) {
    let mut steps = Vec::with_capacity(ops.len());
    let mut first_error = None;

    for (index, op) in ops.iter().enumerate() {
        let result = match op.kind {
            OpKind::Deposit => account.deposit(op.amount),
            OpKind::Withdraw => account.withdraw(op.amount),
        };

        steps.push(StepResult {
            step: index + 1,
            operation: op.kind,
            amount: op.amount,
            ok: result.is_ok(),
            error: result.as_ref().err().map(|e| e.to_string()),
            balance: account.balance(),
        });

        if let Err(e) = result {
            first_error.get_or_insert(e);
            if !keep_going {
                break;
            }
        }
    }

    (steps, first_error)
}

fn print_report(report: &SimulationReport) {
    println!("{}", format!("Account {}", report.account.email()).bold());
    println!("  Policy: {}", report.account.policy().withdraw_policy);
    println!("  Starting balance: {}", output::format_money(report.starting_balance));
    println!();

    if !report.steps.is_empty() {
        let mut table = output::create_table();
        table.set_header(vec!["#", "Operation", "Amount", "Result", "Balance"]);
        for step in &report.steps {
            let outcome = match &step.error {
                None => "ok".to_string(),
                Some(e) => e.clone(),
            };
            table.add_row(vec![
                step.step.to_string(),
                step.operation.to_string(),
                output::format_money(step.amount),
                outcome,
                output::format_money(step.balance),
            ]);
        }
        println!("{}", table);
        println!();
    }

    let summary = format!("Final balance: {}", output::format_money(report.account.balance()));
    if report.steps.iter().all(|s| s.ok) {
        output::success(&summary);
    } else {
        output::warning(&summary);
    }
}
