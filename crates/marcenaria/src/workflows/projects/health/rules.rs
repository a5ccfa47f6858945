use super::super::domain::{ProductionStatus, ProjectSnapshot, ProjectStatus, QualityRating};
use super::HealthThresholds;
use chrono::NaiveDate;

pub(crate) fn red_reasons(
    snapshot: &ProjectSnapshot,
    today: NaiveDate,
    thresholds: &HealthThresholds,
) -> Vec<String> {
    let mut reasons = Vec::new();
    let project = &snapshot.project;

    if let Some(delivery) = project.promised_delivery {
        if delivery < today && !project.status.is_closed() {
            let days_late = (today - delivery).num_days();
            reasons.push(format!(
                "Prazo de entrega estourado ({days_late} {} de atraso)",
                plural_days(days_late)
            ));
        }
    }

    if let Some(production) = &snapshot.production {
        if production.status == ProductionStatus::Pausada {
            reasons.push("Produção pausada".to_string());
        }

        if let Some(rate) = production.rejection_rate {
            if rate > thresholds.critical_rejection_rate {
                reasons.push(format!(
                    "Taxa de rejeição crítica: {rate:.1}% (limite {:.0}%)",
                    thresholds.critical_rejection_rate
                ));
            }
        }
    }

    if let Some(feedback) = &snapshot.feedback {
        if feedback.would_recommend == Some(false) {
            reasons.push("Cliente não recomendaria a empresa".to_string());
        }
    }

    if let Some(challenges) = snapshot
        .assembly
        .as_ref()
        .and_then(|assembly| assembly.challenges.as_deref())
    {
        if challenges
            .to_lowercase()
            .contains(&thresholds.critical_challenge_marker)
        {
            reasons.push(format!(
                "Montagem com desafio crítico: {}",
                challenges.trim()
            ));
        }
    }

    reasons
}

pub(crate) fn yellow_reasons(
    snapshot: &ProjectSnapshot,
    today: NaiveDate,
    thresholds: &HealthThresholds,
) -> Vec<String> {
    let mut reasons = Vec::new();
    let project = &snapshot.project;

    if let (Some(sale), Some(delivery)) = (project.sale_date, project.promised_delivery) {
        if project.status != ProjectStatus::Entregue {
            let planned_days = (delivery - sale).num_days();
            let elapsed_days = (today - sale).num_days();
            let consumed_pct = timeline_consumed_pct(elapsed_days, planned_days);
            if consumed_pct >= thresholds.timeline_warning_pct && consumed_pct < 100.0 {
                let remaining = (delivery - today).num_days();
                reasons.push(format!(
                    "Prazo {consumed_pct:.0}% consumido ({remaining} {} restantes)",
                    plural_days(remaining)
                ));
            }
        }
    }

    if project.status == ProjectStatus::Orcamento {
        if let Some(first_contact) = project.first_contact {
            let waiting = (today - first_contact).num_days();
            if waiting > thresholds.quote_follow_up_days {
                reasons.push(format!("Orçamento sem retorno há {waiting} dias"));
            }
        }
    }

    if let Some(production) = &snapshot.production {
        if let Some(rate) = production.rejection_rate {
            if rate > thresholds.warning_rejection_rate
                && rate <= thresholds.critical_rejection_rate
            {
                reasons.push(format!("Taxa de rejeição em atenção: {rate:.1}%"));
            }
        }

        if let Some(expected) = production.expected_finish {
            if expected < today && production.status != ProductionStatus::Concluida {
                reasons.push(format!(
                    "Produção atrasada: previsão de término era {}",
                    expected.format("%d/%m/%Y")
                ));
            }
        }
    }

    if let Some(feedback) = &snapshot.feedback {
        if feedback.assembly_rating == Some(QualityRating::Regular) {
            reasons.push("Avaliação regular da montagem".to_string());
        }
        if feedback.fabrication_rating == Some(QualityRating::Regular) {
            reasons.push("Avaliação regular da fabricação".to_string());
        }
    }

    reasons
}

/// Share of the planned window already used; a non-positive window counts as 0%.
pub(crate) fn timeline_consumed_pct(elapsed_days: i64, planned_days: i64) -> f64 {
    if planned_days <= 0 {
        return 0.0;
    }
    elapsed_days as f64 / planned_days as f64 * 100.0
}

fn plural_days(days: i64) -> &'static str {
    if days.abs() == 1 {
        "dia"
    } else {
        "dias"
    }
}
