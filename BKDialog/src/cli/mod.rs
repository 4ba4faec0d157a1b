//! BKDialog CLI
//!
//! - `compile` - build one `.dialog` file into its packed blob (hex dump or file)
//! - `inspect` - decode a compiled blob back into authoring form
//! - `scan` - run the loader's full refresh over a mods folder and report
//!
//! Logs go to stderr so `compile` and `inspect` output can be piped.

pub mod commands;

use clap::Parser;
use commands::Commands;

#[derive(Parser)]
#[command(name = "bkdialog")]
#[command(about = "BKDialog: Banjo-Kazooie dialog compiler", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Run the BKDialog CLI
pub fn run_cli() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    cli.command.execute()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::try_parse_from(["bkdialog", "compile", "0C5E.dialog", "-o", "out.bin", "--slot"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Compile { ref source, output: Some(ref output), slot: true }
                if source == Path::new("0C5E.dialog") && output == Path::new("out.bin")
        ));

        let cli = Cli::try_parse_from(["bkdialog", "scan", "mods", "-q"]).unwrap();
        assert!(matches!(cli.command, Commands::Scan { quiet: true, .. }));

        assert!(Cli::try_parse_from(["bkdialog", "inspect"]).is_err());
    }
}
