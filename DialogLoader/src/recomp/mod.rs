//! Bridge between recompiled guest code and host Rust
//!
//! - [`context`] - the register file layout
//! - [`memory`] - guest pointer translation and RDRAM access
//! - [`args`] - argument and return-value marshalling

pub mod args;
pub mod context;
pub mod memory;

pub use args::{FromArg, IntoReturn, MAX_ARGS, arg, arg_path, arg_string, set_return};
pub use context::{Fpr, Gpr, RecompContext};
pub use memory::{BridgeError, GuestPtr, KSEG0_BASE, RDRAM_SIZE, Rdram};
