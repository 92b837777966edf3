mod cli;
mod config;
mod run;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    run::initialise_tracing();

    match cli.command {
        Command::Convert(args) => run::convert(args),
        Command::Run(args) => run::run_job(&args.job),
        Command::Effects => run::effects(),
        Command::Shader(args) => run::shader(args),
    }
}
