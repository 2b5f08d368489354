use std::process::ExitCode;

use clap::Parser;

mod commands;
mod printer;

use commands::Command;
use dirreader_runtime::logging;

#[derive(Debug, Parser)]
#[command(
    name = "dirreader",
    version,
    about = "Inventory a directory tree, optionally filtered and hashed"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

fn main() -> ExitCode {
    logging::init().ok();

    let cli = Cli::parse();
    match cli.command {
        Command::Scan(args) => commands::scan::run(args),
    }
}
