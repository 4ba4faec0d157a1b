//! `bkdialog` command-line entry point

fn main() -> anyhow::Result<()> {
    bkdialog::cli::run_cli()
}
