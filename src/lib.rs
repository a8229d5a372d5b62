pub mod cli;
pub mod commands;
pub mod config;
pub mod events;
pub mod logging;
pub mod report;
pub mod state;

pub use events::TestEvent;
pub use report::{Reporter, TapReporter};
pub use state::{AssertionFailure, RunError};
