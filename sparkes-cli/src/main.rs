//! Sparkes CLI - chart and tabulate exported nutrition and weight logs.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "sparkes-cli",
    version,
    about = "Trend charts and weekly tables for nutrition and weight logs"
)]
struct Cli {
    #[command(subcommand)]
    command: sparkes_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("starting sparkes-cli");
    sparkes_cmd::run(cli.command)
}
