use clap::Parser;
use droidsync::config::{Cli, SyncOptions};
use droidsync::remote::AdbShell;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let options = SyncOptions::from(cli);

    let bridge = AdbShell::new();
    droidsync::commands::sync::run(&options, &bridge)?;

    Ok(())
}
