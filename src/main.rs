use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = appstage::cli::Cli::parse();
    appstage::app::run(cli)
}
