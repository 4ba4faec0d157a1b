#![allow(non_snake_case)]
//! # DialogLoader
//!
//! Host plugin for the Banjo-Kazooie static recompilation. The host calls the
//! `DialogLoader_*` entry points with the emulated RDRAM and the caller's
//! register context; replacement dialogs are compiled by [`bkdialog`] and
//! copied straight into guest memory.
//!
//! ```text
//! DialogLoader_SetModsFolderPath(path)    -> 0
//! DialogLoader_RefreshAll()               -> 0
//! DialogLoader_RefreshDialog(text_id)     -> 0
//! DialogLoader_GetDialog(text_id, dest)   -> 1 on hit, 0 on miss
//! DialogLoader_RefreshQuizQ(quiz_id)      -> 0
//! DialogLoader_GetQuizQ(quiz_id, dest)    -> 0
//! ```

pub mod exports;
pub mod logging;
pub mod recomp;
pub mod state;

pub use recomp::{BridgeError, GuestPtr, Rdram, RecompContext};
