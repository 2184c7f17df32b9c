//! Teller CLI - validated account operations in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use teller_core::{EmailRule, WithdrawPolicy};

mod commands;
mod output;

use commands::{check, config, simulate, transfer, PolicyOverrides};

/// Teller - validated account operations in your terminal
#[derive(Parser)]
#[command(name = "teller", version, about, long_about = None)]
struct Cli {
    /// Withdraw policy (strict, zero-tolerant); overrides settings
    #[arg(long, global = true, value_parser = parse_withdraw_policy)]
    withdraw_policy: Option<WithdrawPolicy>,

    /// Email prefix rule (alphanumeric, dot-underscore); overrides settings
    #[arg(long, global = true, value_parser = parse_email_rule)]
    email_rule: Option<EmailRule>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an email or an amount
    Check {
        #[command(subcommand)]
        command: check::CheckCommands,
    },

    /// Open one account and apply deposits/withdrawals in order
    Simulate {
        /// Account email
        #[arg(long)]
        email: String,
        /// Starting balance
        #[arg(long)]
        balance: String,
        /// Operations such as deposit=0.30 or withdraw=50
        ops: Vec<String>,
        /// Continue past failing operations
        #[arg(long)]
        keep_going: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Open two accounts and transfer between them
    Transfer {
        /// Source account as EMAIL=BALANCE
        #[arg(long)]
        from: String,
        /// Target account as EMAIL=BALANCE
        #[arg(long)]
        to: String,
        /// Amount to transfer
        #[arg(long)]
        amount: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or change settings
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },
}

fn parse_withdraw_policy(value: &str) -> std::result::Result<WithdrawPolicy, String> {
    WithdrawPolicy::parse(value).ok_or_else(|| format!("unknown withdraw policy: {}", value))
}

fn parse_email_rule(value: &str) -> std::result::Result<EmailRule, String> {
    EmailRule::parse(value).ok_or_else(|| format!("unknown email rule: {}", value))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let overrides = PolicyOverrides {
        withdraw_policy: cli.withdraw_policy,
        email_rule: cli.email_rule,
    };

    match cli.command {
        Commands::Check { command } => check::run(command, &overrides),
        Commands::Simulate { email, balance, ops, keep_going, json } => {
            simulate::run(&email, &balance, &ops, keep_going, json, &overrides)
        }
        Commands::Transfer { from, to, amount, json } => {
            transfer::run(&from, &to, &amount, json, &overrides)
        }
        Commands::Config { command } => config::run(command),
    }
}
