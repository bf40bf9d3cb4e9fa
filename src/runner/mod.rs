//! Task execution engine
//!
//! This module turns a selected task into child process invocations:
//! environment overlays, invocation specs, the spawner seam and the
//! task handlers themselves.

pub mod context;
pub mod env;
pub mod invocation;
pub mod spawn;
pub mod task;

// Re-export main types
pub use context::*;
pub use env::*;
pub use invocation::*;
pub use spawn::*;
pub use task::*;
