use super::super::domain::{Budget, BudgetStatus};
use super::{FactorKind, FactorTone, ScoreFactor, ScoreSignals, ScoringConfig};

pub(crate) fn score_budget(
    budget: &Budget,
    signals: &ScoreSignals,
    config: &ScoringConfig,
) -> (i32, Vec<ScoreFactor>) {
    let mut factors = Vec::new();
    let mut score = config.base_score;

    let origin_points = (signals.origin_rate * config.origin_weight).round() as i32;
    score += origin_points;
    if signals.origin_rate > 0.5 {
        factors.push(ScoreFactor {
            kind: FactorKind::Origin,
            tone: FactorTone::Positive,
            points: origin_points,
            note: format!(
                "Origem {} converte {:.0}% dos orçamentos",
                budget.lead_origin.as_deref().unwrap_or("não informada"),
                signals.origin_rate * 100.0
            ),
        });
    }

    if let Some(ratio) = signals.ticket_ratio {
        let (lower, upper) = config.ticket_band;
        if (lower..=upper).contains(&ratio) {
            score += 10;
            factors.push(ScoreFactor {
                kind: FactorKind::Ticket,
                tone: FactorTone::Positive,
                points: 10,
                note: format!("Valor alinhado ao ticket médio ({ratio:.2}x)"),
            });
        } else if ratio > upper {
            score -= 5;
            factors.push(ScoreFactor {
                kind: FactorKind::Ticket,
                tone: FactorTone::Caution,
                points: -5,
                note: format!("Valor {ratio:.1}x acima do ticket médio"),
            });
        }
    }

    let days = signals.days_since_quote;
    match days {
        d if d <= 3 => {
            score += 15;
            factors.push(ScoreFactor {
                kind: FactorKind::Recency,
                tone: FactorTone::Positive,
                points: 15,
                note: format!("Orçamento recente ({d} dias)"),
            });
        }
        d if d <= 7 => score += 10,
        d if d <= 14 => {
            score += 5;
            factors.push(ScoreFactor {
                kind: FactorKind::Recency,
                tone: FactorTone::Caution,
                points: 5,
                note: format!("Orçamento esfriando ({d} dias sem fechamento)"),
            });
        }
        d => {
            score -= 5;
            factors.push(ScoreFactor {
                kind: FactorKind::Recency,
                tone: FactorTone::Caution,
                points: -5,
                note: format!("Orçamento parado há {d} dias"),
            });
        }
    }

    if budget.status == BudgetStatus::Enviado {
        score += 10;
        factors.push(ScoreFactor {
            kind: FactorKind::Status,
            tone: FactorTone::Positive,
            points: 10,
            note: "Orçamento já enviado ao cliente".to_string(),
        });
    }

    (score, factors)
}
