//! Text encoding for the game's single-byte font

mod latin1;

pub use latin1::{REPLACEMENT, latin1_to_utf8, utf8_to_latin1};
