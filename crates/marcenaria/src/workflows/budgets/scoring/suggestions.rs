use super::{ScoreSignals, ScoringConfig};

pub const CALL_CLIENT_SUGGESTION: &str =
    "Ligar para o cliente e tirar dúvidas sobre o orçamento";
pub const PRIORITIZE_SUGGESTION: &str =
    "Alta probabilidade de fechamento: priorizar este orçamento";
pub const CHECK_OBJECTIONS_SUGGESTION: &str =
    "Baixa probabilidade de fechamento: verificar objeções do cliente";

/// Call-to-action list derived from the same signals as the score, in display order.
pub(crate) fn suggest(signals: &ScoreSignals, score: u8, config: &ScoringConfig) -> Vec<String> {
    let mut suggestions = Vec::new();
    let days = signals.days_since_quote;

    if days > 3 && days <= 7 {
        suggestions.push(CALL_CLIENT_SUGGESTION.to_string());
    } else if days > 7 {
        suggestions.push(format!(
            "Reativação urgente: orçamento sem resposta há {days} dias"
        ));
    }

    if let Some(ratio) = signals.ticket_ratio {
        if ratio > config.ticket_band.1 {
            suggestions.push(format!(
                "Valor {ratio:.1}x acima do ticket médio: oferecer parcelamento ou desconto"
            ));
        }
    }

    if score >= config.high_probability {
        suggestions.push(PRIORITIZE_SUGGESTION.to_string());
    } else if score < config.low_probability {
        suggestions.push(CHECK_OBJECTIONS_SUGGESTION.to_string());
    }

    suggestions
}
