//! mazda-tool: MyMazda remote command line tool.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use mazda_cli::{error::display_error, Args};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(verbose: bool) -> Result<()> {
    let directive = if verbose {
        "mazda_cli=debug"
    } else {
        "mazda_cli=warn"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(directive.parse()?))
        .try_init()?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    if std::env::args_os().len() < 2 {
        if let Err(e) = Args::command().print_help() {
            eprintln!("Failed to print help: {e}");
        }
        return ExitCode::from(1);
    }

    let args = Args::parse();
    if let Err(e) = init_tracing(args.verbose) {
        eprintln!("Failed to initialize logging: {e}");
    }

    match mazda_cli::run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            display_error(&err);
            ExitCode::from(err.exit_code())
        }
    }
}
