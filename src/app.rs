use anyhow::Result;

use crate::cli::{Cli, Cmd, Overrides};
use crate::config::Config;

pub fn run(cli: Cli) -> Result<()> {
    let Cli { config, app_dir, cmd } = cli;
    let resolve = |overrides: &Overrides| Config::resolve(config.as_deref(), app_dir.clone(), overrides);

    match cmd {
        Cmd::Build { overrides } => crate::tasks::build::run(&resolve(&overrides)?),
        Cmd::List { overrides } => crate::tasks::list::run(&resolve(&overrides)?),
        Cmd::Check { overrides } => crate::tasks::check::run(&resolve(&overrides)?),
        Cmd::Embed { out, overrides } => crate::embed::generate(&resolve(&overrides)?, out.as_deref()),
        Cmd::Clean { all } => crate::tasks::clean::run(&resolve(&Overrides::default())?, all),
        Cmd::Doctor { overrides } => crate::tasks::doctor::run(&resolve(&overrides)?),
    }
}
