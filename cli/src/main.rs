#![forbid(unsafe_code)]

use std::io;

use anyhow::Result;
use clap::Parser;
use employee_cli::{Args, Output};
use employee_core::EmployeeService;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(verbose: bool) -> Result<()> {
    let fallback = if verbose { "employee_core=debug,employee_cli=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(fallback))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(io::stderr))
        .try_init()?;
    Ok(())
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_tracing(args.verbose)?;

    tracing::debug!(base_url = %args.base_url, "using employee api");
    let api = EmployeeService::connect(&args.base_url);
    let mut out = Output::new(args.json, io::stdout());
    let mut input = io::stdin().lock();

    employee_cli::run(args.command, &api, &mut out, &mut input)
}
