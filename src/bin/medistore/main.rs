//! medistore: drive the storefront data layer from the command line.
//! Prints the `{data, error}` envelope; exits 1 when it carries an error.
#![deny(clippy::all, clippy::pedantic)]

mod args;
mod client;
mod handlers;
mod io;
mod print;


use std::process::ExitCode;

use clap::Parser;
use medistore::infra::telemetry;

use args::Cli;
use client::{CliError, Ctx, load_settings};
use print::print_json;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> Result<bool, CliError> {
    let settings = load_settings(&cli)?;
    telemetry::init(&settings.logging)?;

    let ctx = Ctx::new(&settings, cli.session.as_deref())?;
    let rendered = handlers::dispatch(&ctx, cli.command).await?;
    print_json(&rendered.body)?;
    Ok(rendered.ok)
}
