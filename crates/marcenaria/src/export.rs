//! CSV export of project alerts and closure scores for spreadsheets.

use std::io::Write;

use serde::Serialize;

use crate::workflows::budgets::BudgetScoreResult;
use crate::workflows::projects::ProjectAlert;

const LIST_SEPARATOR: &str = " | ";

#[derive(Debug, Serialize)]
struct AlertRow<'a> {
    projeto_id: &'a str,
    cliente_nome: &'a str,
    ambiente: &'a str,
    nivel: &'static str,
    motivos: String,
}

#[derive(Debug, Serialize)]
struct ScoreRow<'a> {
    orcamento_id: &'a str,
    cliente_nome: &'a str,
    score: u8,
    sugestoes: String,
    gravado: bool,
}

pub fn write_alerts_csv<W: Write>(writer: W, alerts: &[ProjectAlert]) -> Result<(), csv::Error> {
    let mut csv = csv::Writer::from_writer(writer);
    for alert in alerts {
        csv.serialize(AlertRow {
            projeto_id: &alert.project_id.0,
            cliente_nome: &alert.client_name,
            ambiente: alert.environment.as_deref().unwrap_or(""),
            nivel: alert.level.label(),
            motivos: alert.reasons.join(LIST_SEPARATOR),
        })?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_scores_csv<W: Write>(
    writer: W,
    results: &[BudgetScoreResult],
) -> Result<(), csv::Error> {
    let mut csv = csv::Writer::from_writer(writer);
    for result in results {
        csv.serialize(ScoreRow {
            orcamento_id: &result.budget_id.0,
            cliente_nome: &result.client_name,
            score: result.score,
            sugestoes: result.suggestions.join(LIST_SEPARATOR),
            gravado: result.write_back.is_saved(),
        })?;
    }
    csv.flush()?;
    Ok(())
}
