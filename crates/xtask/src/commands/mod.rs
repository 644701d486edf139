//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod decide;
mod field;
mod inputs;

pub use decide::Decide;
pub use field::Field;
