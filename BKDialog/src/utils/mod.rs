//! Shared helpers

mod text_id;

pub use text_id::TextId;
