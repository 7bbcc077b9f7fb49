mod cli;
mod commands;
mod error;
mod live;
mod logging;
mod metadata;
mod output;
mod session;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.log_level);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::debug!(?error, "command failed");
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run(cli: &Cli) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let (envelope, table) = commands::run(cli, &mut out).await?;
    output::render(&mut out, &envelope, table.as_ref(), cli.format, cli.pretty)?;
    out.flush()?;
    Ok(())
}
