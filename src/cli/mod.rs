//! CLI module - argument parsing and interactive prompts

mod args;
pub mod bounds;
mod prompts;

pub use args::{Cli, Commands};
pub use prompts::*;
