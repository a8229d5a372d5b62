// State module - reporter bookkeeping
// Scope stack and the failure records reported into it

pub mod context;
pub mod failure;

pub use context::{ClosedScope, Context, ContextStack};
pub use failure::{AssertionFailure, RunError};
