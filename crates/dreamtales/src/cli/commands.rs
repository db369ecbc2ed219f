//! CLI command definitions.

use clap::{Parser, Subcommand};
use dreamtales::StoryLength;
use std::path::PathBuf;

/// DreamTales - bedtime stories with pictures, narration and a storybook
#[derive(Parser, Debug)]
#[command(name = "dreamtales")]
#[command(about = "Bedtime stories with pictures, narration and a storybook", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Read settings from this file instead of the usual locations
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// OpenAI-compatible API base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate stories in one session
    ///
    /// Topics are requested in order, so repeating a topic shows the cache
    /// and asking for more than the quota shows the wait.
    Generate {
        /// Story topics
        #[arg(required = true)]
        topics: Vec<String>,

        /// Story length (short or medium)
        #[arg(long, default_value = "short")]
        length: StoryLength,

        /// Name of the child the story is for
        #[arg(long)]
        subject: Option<String>,

        /// Copy narration and storybook files into this directory
        #[arg(long)]
        out: Option<PathBuf>,

        /// Keep artifacts here instead of a temporary directory
        #[arg(long)]
        storage: Option<PathBuf>,
    },

    /// Write a single story at a target word count
    Story {
        /// Story idea
        idea: String,

        /// Target word count
        #[arg(long)]
        words: Option<usize>,
    },

    /// Print the effective configuration as TOML
    Config,
}
