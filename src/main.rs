//! Pulse CLI - Session status lines and plugin marketplace checks

use clap::Parser;

use pulse_cli::cli::Cli;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = cli.run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
