//! Command line interface
//!
//! Subcommands:
//! - `kitty show` - every member with balance and history (default)
//! - `kitty members` - member names and balances
//! - `kitty deposit <name> <amount>` - add savings to a member
//! - `kitty reset` - set every balance to zero
//! - `kitty add <name>` / `kitty remove <name>` - manage members
//! - `kitty total` - group total
//! - `kitty tui` - interactive terminal UI

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::data::BackendKind;
use crate::ledger::{describe_transaction, format_money, Ledger};

#[derive(Parser, Debug)]
#[command(name = "kitty")]
#[command(about = "Group savings ledger for the terminal")]
#[command(version)]
pub struct Cli {
    /// Directory for the database, config and logs (default: ~/.kitty)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Storage backend, overriding the config file (sqlite or json)
    #[arg(long, global = true)]
    pub backend: Option<BackendKind>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show every member with balance and history
    Show,

    /// List member names and balances
    Members,

    /// Deposit an amount for a member
    Deposit {
        /// Member name (case-sensitive)
        name: String,

        /// Amount greater than 0
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Reset every balance to 0, keeping history
    Reset,

    /// Add a member
    Add {
        /// New member name
        name: String,
    },

    /// Remove a member and their history
    Remove {
        /// Member name (case-sensitive)
        name: String,
    },

    /// Print the group total
    Total,

    /// Open the interactive terminal UI
    Tui,
}

/// Run a non-interactive command against the ledger, writing its report to `out`
pub fn run(command: Command, ledger: &mut Ledger, currency: &str, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Show => write_show(ledger, currency, out)?,
        Command::Members => {
            for member in ledger.members() {
                writeln!(out, "{}: {}", member.name, format_money(currency, member.savings))?;
            }
        }
        Command::Deposit { name, amount } => {
            let balance = ledger.deposit(&name, &amount)?;
            writeln!(out, "{name} now has {}", format_money(currency, balance))?;
        }
        Command::Reset => {
            ledger.reset_all()?;
            writeln!(out, "All balances reset")?;
        }
        Command::Add { name } => {
            let name = ledger.add_member(&name)?;
            writeln!(out, "Added {name}")?;
        }
        Command::Remove { name } => {
            let removed = ledger.remove_member(&name)?;
            writeln!(out, "Removed {}", removed.name)?;
        }
        Command::Total => write_total(ledger, currency, out)?,
        Command::Tui => anyhow::bail!("The tui command needs an interactive terminal"),
    }
    Ok(())
}

fn write_show(ledger: &Ledger, currency: &str, out: &mut impl Write) -> Result<()> {
    if ledger.is_empty() {
        writeln!(out, "No members yet")?;
    }
    for member in ledger.members() {
        writeln!(out, "{}: {}", member.name, format_money(currency, member.savings))?;
        if member.transactions.is_empty() {
            writeln!(out, "  No transactions")?;
        }
        for transaction in &member.transactions {
            writeln!(out, "  {}", describe_transaction(currency, transaction))?;
        }
    }
    write_total(ledger, currency, out)
}

fn write_total(ledger: &Ledger, currency: &str, out: &mut impl Write) -> Result<()> {
    writeln!(
        out,
        "Group total: {}",
        format_money(currency, ledger.total_savings())
    )?;
    Ok(())
}
