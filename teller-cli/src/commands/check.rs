//! Check command - run the email and amount validators

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use serde::Serialize;

use teller_core::domain::amount::parse_amount;
use teller_core::{is_amount_valid, OperationResult};

use super::{get_policy, PolicyOverrides};
use crate::output;

#[derive(Subcommand)]
pub enum CheckCommands {
    /// Check an email address
    Email {
        email: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check a monetary amount
    Amount {
        amount: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Serialize)]
struct CheckResult {
    input: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    rule: Option<String>,
}

pub fn run(command: CheckCommands, overrides: &PolicyOverrides) -> Result<()> {
    match command {
        CheckCommands::Email { email, json } => {
            let rule = get_policy(overrides)?.email_rule;
            let result = CheckResult {
                valid: rule.is_valid(&email),
                input: email,
                rule: Some(rule.to_string()),
            };
            report(result, json)
        }
        CheckCommands::Amount { amount, json } => {
            // An unparsable amount is simply invalid
            let valid = parse_amount(&amount).map(is_amount_valid).unwrap_or(false);
            report(CheckResult { input: amount, valid, rule: None }, json)
        }
    }
}

fn report(result: CheckResult, json: bool) -> Result<()> {
    if json {
        return output::print_json(&OperationResult::ok(result));
    }

    if result.valid {
        println!("{} is {}", result.input, "valid".green());
    } else {
        println!("{} is {}", result.input, "invalid".red());
    }
    if let Some(rule) = &result.rule {
        println!("  Rule: {}", rule);
    }
    Ok(())
}
