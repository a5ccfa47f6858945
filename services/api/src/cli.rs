use crate::reports::{run_alert_report, run_score_report, AlertReportArgs, ScoreReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use marcenaria::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Marcenaria Insights",
    about = "Project health alerts and budget closure scores for custom furniture shops",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Classify every project of an owner and print the alerts
    Alerts(AlertReportArgs),
    /// Score the open budgets of an owner and write the results back
    Score(ScoreReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// JSON snapshot used to seed the in-memory store
    #[arg(long)]
    pub(crate) seed: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Alerts(args) => run_alert_report(args),
        Command::Score(args) => run_score_report(args),
    }
}
