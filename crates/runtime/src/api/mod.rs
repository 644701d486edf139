//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! the dispatcher and the decision engine can stay focused on their work.

pub mod errors;
pub mod sink;

pub use errors::{Result, RuntimeError};
pub use sink::{ChannelSink, CommandSink, NullSink};
