use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use reportity::cli::{handle_columns_command, handle_render_command, ColumnsArgs, RenderArgs};
use reportity::ReportError;

#[derive(Parser)]
#[command(
    name = "reportity",
    version,
    about = "Render record tables as paginated PDF reports",
    long_about = "Reportity turns rows of CSV or JSON data into a styled PDF table \
                  with a title, timestamp, optional logo and an optional total row. \
                  The document can also be written as base64 text or CSV."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a data file into a report
    Render(RenderArgs),

    /// Show the columns detected in a data file
    #[command(alias = "cols")]
    Columns(ColumnsArgs),
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("REPORTITY_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Render(args) => handle_render_command(args)?,
        Commands::Columns(args) => handle_columns_command(args)?,
    }
    Ok(())
}

fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<ReportError>() {
        Some(ReportError::Config(_)) => 2,
        Some(ReportError::Resource { .. }) | Some(ReportError::Input(_)) => 3,
        Some(ReportError::Schema(_)) => 4,
        _ => 1,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(exit_code(&err))
        }
    }
}
