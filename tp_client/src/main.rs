//! A text-mode chip tracker for a Teen Patti table.
//!
//! Cards are real; the client keeps track of chips, turns and who owes
//! whom. Commands are read line by line from standard input.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Error};
use ctrlc::set_handler;
use log::info;
use pico_args::Arguments;
use tp_client::{
    app::{App, COMMANDS_HELP, Reply},
    config::{ClientConfig, Overrides},
};

const HELP: &str = "\
Track chips for a Teen Patti table

USAGE:
  tp_client [OPTIONS]

OPTIONS:
  --balance    N          Starting balance per player  [default: env TP_INITIAL_BALANCE or 1000]
  --boot       N          Boot collected every hand    [default: env TP_BOOT_AMOUNT or 10]
  --rebuy      N          Default rebuy amount         [default: env TP_REBUY_AMOUNT or 1000]

FLAGS:
  -h, --help              Print help information

ENVIRONMENT:
  TP_INITIAL_BALANCE      Starting balance per player
  TP_BOOT_AMOUNT          Boot collected every hand
  TP_REBUY_AMOUNT         Chips bought by a rebuy without an amount
  RUST_LOG                Log level (e.g., info)
  (A .env file in the working directory is read if present)
";

fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let overrides = Overrides {
        initial_balance: pargs.opt_value_from_str("--balance")?,
        boot_amount: pargs.opt_value_from_str("--boot")?,
        rebuy_amount: pargs.opt_value_from_str("--rebuy")?,
    };

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    env_logger::builder().format_target(false).init();

    let config = ClientConfig::from_env(&overrides).context("Failed to load configuration")?;
    info!(
        "starting balance {}, boot {}, rebuy {}",
        config.initial_balance, config.boot_amount, config.rebuy_amount
    );

    run(App::new(config)?)
}

fn run(mut app: App) -> Result<(), Error> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("Teen Patti chip tracker. Commands:\n{COMMANDS_HELP}");
    print!("> ");
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read input")?;
        match app.handle_line(&line) {
            Reply::Print(text) => print!("{text}"),
            Reply::Quit => break,
        }
        print!("> ");
        stdout.flush()?;
    }

    if app.game_in_progress() {
        info!("leaving with a game in progress");
    }
    Ok(())
}
