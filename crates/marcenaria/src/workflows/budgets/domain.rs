use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::OwnerId;

/// Identifier wrapper for rows in `orcamentos`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BudgetId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BudgetStatus {
    Rascunho,
    Enviado,
    Aprovado,
    Rejeitado,
    Expirado,
    Convertido,
}

impl BudgetStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rascunho => "Rascunho",
            Self::Enviado => "Enviado",
            Self::Aprovado => "Aprovado",
            Self::Rejeitado => "Rejeitado",
            Self::Expirado => "Expirado",
            Self::Convertido => "Convertido",
        }
    }

    /// Drafts and sent quotes are still waiting on the client.
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Rascunho | Self::Enviado)
    }
}

/// Row of `orcamentos`, including the fields written back by the scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,
    pub user_id: OwnerId,
    #[serde(rename = "cliente_nome")]
    pub client_name: String,
    #[serde(rename = "valor_total")]
    pub total_value: f64,
    #[serde(rename = "origem_lead", default)]
    pub lead_origin: Option<String>,
    #[serde(rename = "ambiente", default)]
    pub environment: Option<String>,
    #[serde(rename = "data_orcamento")]
    pub quote_date: NaiveDate,
    pub status: BudgetStatus,
    #[serde(rename = "visualizado_cliente", default)]
    pub viewed_by_client: bool,
    #[serde(rename = "formulario_preenchido", default)]
    pub form_filled: bool,
    #[serde(rename = "score_fechamento", default)]
    pub closure_score: Option<u8>,
    #[serde(rename = "sugestoes_ia", default)]
    pub suggestions: Vec<String>,
    #[serde(rename = "score_calculado_em", default)]
    pub scored_at: Option<DateTime<Utc>>,
}

impl Budget {
    /// Overwrite the scorer-owned fields; earlier results are not kept.
    pub fn apply_score(&mut self, write_back: &ScoreWriteBack) {
        self.closure_score = Some(write_back.score);
        self.suggestions = write_back.suggestions.clone();
        self.scored_at = Some(write_back.computed_at);
    }
}

/// Fields persisted onto a budget after it has been scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreWriteBack {
    #[serde(rename = "score_fechamento")]
    pub score: u8,
    #[serde(rename = "sugestoes_ia")]
    pub suggestions: Vec<String>,
    #[serde(rename = "score_calculado_em")]
    pub computed_at: DateTime<Utc>,
}
