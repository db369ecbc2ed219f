//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the dreamtales binary.

mod commands;
mod run;

pub use commands::{Cli, Commands};
pub use run::{GenerateOptions, load_config, print_config, run_generate, run_story};
