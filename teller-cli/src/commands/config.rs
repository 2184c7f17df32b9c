//! Config command - show or change settings

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use serde_json::json;

use teller_core::{Config, OperationResult};

use super::get_teller_dir;
use crate::output;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change a setting (withdraw-policy, email-rule)
    Set {
        key: String,
        value: String,
    },
}

pub fn run(command: ConfigCommands) -> Result<()> {
    let teller_dir = get_teller_dir()?;

    match command {
        ConfigCommands::Show { json } => {
            let config = Config::load(&teller_dir)?;
            if json {
                return output::print_json(&OperationResult::ok(json!({
                    "withdrawPolicy": config.withdraw_policy,
                    "emailRule": config.email_rule,
                })));
            }
            println!("{}", "Teller Settings".bold());
            println!("  withdraw-policy: {}", config.withdraw_policy);
            println!("  email-rule:      {}", config.email_rule);
            Ok(())
        }
        ConfigCommands::Set { key, value } => {
            std::fs::create_dir_all(&teller_dir)
                .with_context(|| format!("Failed to create teller directory: {:?}", teller_dir))?;

            let mut config = Config::load(&teller_dir)?;
            config.set(&key, &value)?;
            config.save(&teller_dir)?;
            output::success(&format!("Set {} = {}", key, value));
            Ok(())
        }
    }
}
