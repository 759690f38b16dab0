//! WQR CLI - Command line tool for water quality sample results and reports.

use clap::Parser;
use env_logger::Env;

#[derive(Parser)]
#[command(
    name = "wqr-cli",
    version,
    about = "Water quality sample results and report export toolkit"
)]
struct Cli {
    #[command(flatten)]
    settings: wqr_cmd::Settings,

    #[command(subcommand)]
    command: wqr_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    log::debug!("Starting with {:?}", cli.settings);
    wqr_cmd::run(cli.settings, cli.command).await
}
