use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

mod account;
mod error;
mod ledger;
mod menu;

use account::Account;
use error::Result;
use ledger::Ledger;
use menu::Menu;

#[derive(Debug, Parser)]
struct Args {
    #[clap(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Open the bank with its two starting accounts.
fn seed_ledger<W: Write>(out: &mut W) -> Result<Ledger> {
    let mut ledger = Ledger::new();
    for (owner, id, balance) in [
        ("Alice", 1001, Decimal::new(500, 0)),
        ("Bob", 1002, Decimal::new(1000, 0)),
    ] {
        ledger.add(Account::new(owner, id, balance)?)?;
        writeln!(out, "Account successfully created!")?;
    }
    Ok(ledger)
}

fn run() -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut ledger = seed_ledger(&mut out)?;
    tracing::info!("bank opened");

    Menu::new(&mut ledger, io::stdin().lock(), &mut out).run()
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "bank session failed");
            ExitCode::FAILURE
        }
    }
}
