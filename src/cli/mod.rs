/// CLI module - Gateway

mod args;
mod commands;

pub use args::{Cli, Commands, OutputFormat};
pub use commands::handle_command;
