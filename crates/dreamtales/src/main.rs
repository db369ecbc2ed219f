//! DreamTales CLI binary.
//!
//! This binary provides command-line access to DreamTales:
//! - Generate illustrated, narrated bedtime stories in one session
//! - Write single stories at a target word count
//! - Show the effective configuration

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{
        Cli, Commands, GenerateOptions, load_config, print_config, run_generate, run_story,
    };

    // Pick up OPENAI_API_KEY from .env when present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_deref())?;
    let base_url = cli.base_url.as_deref();

    match cli.command {
        Commands::Generate {
            topics,
            length,
            subject,
            out,
            storage,
        } => {
            let options = GenerateOptions {
                topics,
                length,
                subject,
                out,
                storage,
            };
            run_generate(&config, &options, base_url).await?;
        }

        Commands::Story { idea, words } => {
            run_story(&config, &idea, words, base_url).await?;
        }

        Commands::Config => {
            print_config(&config)?;
        }
    }

    Ok(())
}
