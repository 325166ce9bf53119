use anyhow::Result;
use tokio::sync::mpsc;

use crate::args::Cli;
use streamline_core::pipeline::{Pipeline, PipelineConfig};

pub async fn run(url: &str, cli: &Cli) -> Result<()> {
    let config = super::load_config(cli)?;
    let pipeline_config = PipelineConfig::resolve(&config)?;

    let (tx, rx) = mpsc::channel(32);
    let progress_handle = super::spawn_progress_renderer(rx);

    let pipeline = Pipeline::new(pipeline_config, tx);
    let result = pipeline.run_music(url).await;

    // Close the stage channel so the renderer task drains out
    drop(pipeline);
    progress_handle.await?;

    match result {
        Ok(output) => {
            println!("\nSaved to: {}", output.display());
            Ok(())
        }
        Err(e) => {
            eprintln!();
            Err(e.into())
        }
    }
}
