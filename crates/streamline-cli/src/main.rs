mod args;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use args::{Cli, Commands, Mode};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let filter = match cli.verbose {
        0 => "streamline=info,streamline_core=info",
        1 => "streamline=debug,streamline_core=debug",
        2 => "streamline=trace,streamline_core=trace",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    // Handle commands
    match &cli.command {
        Some(Commands::Doctor) => commands::doctor::run().await,
        Some(Commands::Config) => commands::config::run(cli.config.as_deref()).await,
        Some(Commands::Clean) => commands::clean::run(&cli).await,
        None => match (cli.url.as_deref(), cli.mode()) {
            (Some(url), Some(Mode::Music)) => commands::music::run(url, &cli).await,
            (Some(url), Some(Mode::Video)) => commands::video::run(url, &cli).await,
            (Some(_), None) => {
                use clap::CommandFactory;
                Cli::command()
                    .error(
                        clap::error::ErrorKind::MissingRequiredArgument,
                        "one of --music or --video is required with a URL",
                    )
                    .exit()
            }
            (None, _) => {
                // No URL, print help
                use clap::CommandFactory;
                Cli::command().print_help()?;
                println!();
                Ok(())
            }
        },
    }
}
