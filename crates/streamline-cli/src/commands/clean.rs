use anyhow::Result;

use crate::args::Cli;
use streamline_core::workdir::Workdir;

pub async fn run(cli: &Cli) -> Result<()> {
    let config = super::load_config(cli)?;
    let workdir = Workdir::new(config.staging_dir()?);

    let removed = workdir.clean()?;
    if removed == 0 {
        println!("Nothing to clean in {}", workdir.root().display());
    } else {
        println!(
            "Removed {} staging file(s) from {}",
            removed,
            workdir.root().display()
        );
    }
    Ok(())
}
