use std::process;

use clap::Parser;
use moed_cli::cli::Cli;
use moed_cli::{commands, logging};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = commands::run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
