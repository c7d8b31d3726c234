//! # CalcLine Main Entry Point

use std::time::Duration;

use anyhow::{bail, Result};
use calcline::cmd_args::CommandLineArgs;
use calcline::config::{self, ClientSettings};
use calcline::AppController;
use tracing_subscriber::{filter::Directive, fmt::time::ChronoLocal, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing_subscriber();

    let cmd_args = CommandLineArgs::parse();

    if !atty::is(atty::Stream::Stdin) || !atty::is(atty::Stream::Stdout) {
        bail!("calcline needs an interactive terminal");
    }

    let api_url = config::get_api_base_url(cmd_args.api_url());
    let settings = ClientSettings::new(&api_url, Duration::from_secs(cmd_args.timeout()))?;
    tracing::info!("Using calculation API at {}", settings.api_base_url());

    let mut app = AppController::new(&settings)?;
    app.run().await?;

    println!("👋 Thanks for using CalcLine!");
    Ok(())
}

fn init_tracing_subscriber() {
    let filter = EnvFilter::try_from_env(config::LOG_LEVEL_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new("error"));
    let filter = ["reqwest", "hyper", "hyper_util", "rustls", "tokio", "mio"]
        .iter()
        .filter_map(|target| format!("{target}=warn").parse::<Directive>().ok())
        .fold(filter, |filter, directive| filter.add_directive(directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_timer(ChronoLocal::rfc_3339())
        .init();
}
