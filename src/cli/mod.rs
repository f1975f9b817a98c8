//! CLI module - argument parsing and the two subcommand runners

mod args;
pub mod keep_percent;
pub mod top_values;

pub use args::{Cli, Commands};
pub use keep_percent::run_keep_percent;
pub use top_values::run_add_top_values;
