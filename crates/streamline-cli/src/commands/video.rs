use anyhow::{Context, Result};
use std::io::Write;
use tokio::io::{stdin, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::args::Cli;
use streamline_core::pipeline::{Pipeline, PipelineConfig};

pub async fn run(url: &str, cli: &Cli) -> Result<()> {
    let config = super::load_config(cli)?;
    let pipeline_config = PipelineConfig::resolve(&config)?;
    let staging_dir = pipeline_config.staging_dir.clone();

    let (tx, rx) = mpsc::channel(32);
    let pipeline = Pipeline::new(pipeline_config, tx);

    // Show the format table before asking for a code
    pipeline.list_formats(url).await?;
    let format_code = prompt_format_code().await?;

    let progress_handle = super::spawn_progress_renderer(rx);
    let result = pipeline.run_video(url, &format_code).await;

    // Close the stage channel so the renderer task drains out
    drop(pipeline);
    progress_handle.await?;

    match result {
        Ok(()) => {
            println!(
                "\nVideo saved in {} with prefix: video_downloaded",
                staging_dir.display()
            );
            Ok(())
        }
        Err(e) => {
            eprintln!();
            Err(e.into())
        }
    }
}

/// Read one line of input holding the format code picked from the table.
async fn prompt_format_code() -> Result<String> {
    print!("\nEnter desired format code (e.g. 22, or 137+140 to merge): ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    BufReader::new(stdin())
        .read_line(&mut line)
        .await
        .context("failed to read format code")?;
    Ok(line.trim().to_string())
}
