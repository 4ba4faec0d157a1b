//! File formats handled by `BKDialog`

pub mod dialog;

pub use dialog::{BkString, Dialog, Section};
