//! # BKDialog
//!
//! Compiler and cache for Banjo-Kazooie dialog replacement files.
//!
//! Dialogs are authored as small `.dialog` text files and compiled into the
//! packed, word-swapped binary layout the game's text engine reads.
//!
//! ## Quick Start
//!
//! ```no_run
//! use bkdialog::prelude::*;
//!
//! // Compile a single file
//! let dialog = read_dialog("mods/DialogLoader/dialog/0C5E.dialog")?;
//! let blob = serialize_dialog(&dialog);
//! assert_eq!(blob.len() % 4, 0);
//!
//! // Or load a whole mods folder into the cache
//! let mut loader = DialogLoader::with_mod_root("mods");
//! let report = loader.refresh_all();
//! println!("Loaded {} dialogs", report.loaded.len());
//! # Ok::<(), bkdialog::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `bkdialog` command-line binary

pub mod cache;
pub mod config;
pub mod error;
pub mod formats;
pub mod loader;
pub mod text;
pub mod utils;

// Re-exports for convenience
pub use error::{Error, Result};
pub use utils::TextId;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::cache::{BlobSlot, DialogCache, SLOT_SIZE};
    pub use crate::config::LoaderConfig;
    pub use crate::error::{Error, Result};
    pub use crate::formats::dialog::{
        BkString, Dialog, Section, parse_dialog, read_blob, read_dialog, serialize_dialog,
    };
    pub use crate::loader::{DialogLoader, RefreshOutcome, RefreshReport};
    pub use crate::text::{latin1_to_utf8, utf8_to_latin1};
    pub use crate::utils::TextId;
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
