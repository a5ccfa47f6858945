use crate::infra::InMemoryStore;
use chrono::{Local, NaiveDate};
use clap::Args;
use marcenaria::config::AppConfig;
use marcenaria::error::AppError;
use marcenaria::export::{write_alerts_csv, write_scores_csv};
use marcenaria::workflows::budgets::router::NO_OPEN_BUDGETS_MESSAGE;
use marcenaria::workflows::budgets::{
    ClosureScoreService, ClosureScorer, ScoreRequest, ScoringReport, ScoringRun, WriteBackStatus,
};
use marcenaria::workflows::projects::{HealthClassifier, PortfolioAlerts, ProjectAlertService};
use marcenaria::workflows::OwnerId;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct AlertReportArgs {
    /// Owner whose projects are classified
    #[arg(long)]
    pub(crate) user_id: String,
    /// Reference date for the classification (defaults to today)
    #[arg(long, value_parser = marcenaria::dates::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// JSON snapshot to read (defaults to APP_SEED_PATH)
    #[arg(long)]
    pub(crate) seed: Option<PathBuf>,
    /// Write the results to this CSV file instead of printing a summary
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreReportArgs {
    /// Owner whose open budgets are scored
    #[arg(long)]
    pub(crate) user_id: String,
    /// Score a single budget instead of every open one
    #[arg(long)]
    pub(crate) orcamento_id: Option<String>,
    /// JSON snapshot to read (defaults to APP_SEED_PATH)
    #[arg(long)]
    pub(crate) seed: Option<PathBuf>,
    /// Write the results to this CSV file instead of printing a summary
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

pub(crate) fn run_alert_report(args: AlertReportArgs) -> Result<(), AppError> {
    let AlertReportArgs {
        user_id,
        today,
        seed,
        csv,
    } = args;

    let store = Arc::new(InMemoryStore::from_seed(&seed_path(seed)?)?);
    let service = ProjectAlertService::new(store, HealthClassifier::default());
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let portfolio = service.portfolio(&OwnerId(user_id.clone()), today)?;

    match csv {
        Some(path) => {
            write_alerts_csv(File::create(&path)?, &portfolio.alerts)?;
            println!(
                "{} alerts written to {}",
                portfolio.alerts.len(),
                path.display()
            );
        }
        None => render_portfolio(&user_id, &portfolio),
    }
    Ok(())
}

pub(crate) fn run_score_report(args: ScoreReportArgs) -> Result<(), AppError> {
    let ScoreReportArgs {
        user_id,
        orcamento_id,
        seed,
        csv,
    } = args;

    let seed = seed_path(seed)?;
    let store = Arc::new(InMemoryStore::from_seed(&seed)?);
    let service =
        ClosureScoreService::new(store.clone(), store.clone(), ClosureScorer::default());
    let request = ScoreRequest {
        user_id: Some(user_id),
        orcamento_id,
    };

    let report = match service.score_open_budgets(&request, Local::now())? {
        ScoringRun::NoOpenBudgets => {
            println!("{NO_OPEN_BUDGETS_MESSAGE}");
            return Ok(());
        }
        ScoringRun::Scored(report) => report,
    };
    store.persist(&seed)?;

    match csv {
        Some(path) => {
            write_scores_csv(File::create(&path)?, &report.results)?;
            println!(
                "{} scores written to {}",
                report.results.len(),
                path.display()
            );
        }
        None => render_scores(&report),
    }
    Ok(())
}

fn seed_path(seed: Option<PathBuf>) -> Result<PathBuf, AppError> {
    match seed {
        Some(path) => Ok(path),
        None => Ok(AppConfig::load()?.store.require_seed()?.clone()),
    }
}

fn render_portfolio(user_id: &str, portfolio: &PortfolioAlerts) {
    println!(
        "Project health for {user_id} on {}",
        portfolio.today.format("%d/%m/%Y")
    );
    println!(
        "- {} vermelho, {} amarelo, {} verde",
        portfolio.counts.red, portfolio.counts.yellow, portfolio.counts.green
    );

    if portfolio.alerts.is_empty() {
        println!("No projects found.");
        return;
    }

    for alert in &portfolio.alerts {
        let environment = alert
            .environment
            .as_deref()
            .map(|environment| format!(" ({environment})"))
            .unwrap_or_default();
        println!(
            "\n[{}] {} {}{}",
            alert.level.label(),
            alert.project_id.0,
            alert.client_name,
            environment
        );
        for reason in &alert.reasons {
            println!("  - {reason}");
        }
    }
}

fn render_scores(report: &ScoringReport) {
    let history = &report.history;
    println!(
        "History: {} of {} projects converted, average ticket {}",
        history.converted_projects,
        history.total_projects,
        history
            .average_ticket
            .map(|ticket| format!("R$ {ticket:.2}"))
            .unwrap_or_else(|| "n/a".to_string())
    );

    for result in &report.results {
        println!(
            "\n{} {}: score {}",
            result.budget_id.0, result.client_name, result.score
        );
        for factor in &result.factors {
            println!("  {:+} {}", factor.points, factor.note);
        }
        for suggestion in &result.suggestions {
            println!("  > {suggestion}");
        }
        if let WriteBackStatus::Failed { error } = &result.write_back {
            println!("  ! score not saved: {error}");
        }
    }
}
