//! Line-oriented shell over the entry form, record log, and sales figures.

pub mod commands;
pub mod context;
pub mod help;
pub mod output;
pub mod registry;
mod shell;
pub mod table;

pub use context::{CliError, CliMode, CommandError, ShellContext};
pub use shell::run_cli;
