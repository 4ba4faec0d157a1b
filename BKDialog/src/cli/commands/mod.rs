use clap::Subcommand;
use std::path::PathBuf;

pub mod compile;
pub mod inspect;
pub mod scan;

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a .dialog file into its packed, word-swapped blob
    Compile {
        /// Source .dialog file
        source: PathBuf,

        /// Write the raw blob to this file instead of printing a hex dump
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Zero-pad (or truncate) the blob to a full 4 KiB cache slot
        #[arg(long)]
        slot: bool,
    },

    /// Decode a compiled blob and print its lines
    Inspect {
        /// Compiled blob file
        source: PathBuf,
    },

    /// Compile every dialog under a mods folder and report the results
    Scan {
        /// Mods folder (the one containing `DialogLoader/`)
        mod_root: PathBuf,

        /// Only print failures
        #[arg(short, long)]
        quiet: bool,
    },
}

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Compile {
                source,
                output,
                slot,
            } => compile::execute(source, output.as_deref(), *slot),
            Commands::Inspect { source } => inspect::execute(source),
            Commands::Scan { mod_root, quiet } => scan::execute(mod_root, *quiet),
        }
    }
}
