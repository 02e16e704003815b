//! Command handlers for the non-interactive subcommands.

pub mod logging;
pub mod search;

pub use logging::init_logging;
pub use search::{run_index, run_search};
