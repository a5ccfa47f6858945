use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::workflows::OwnerId;

/// Identifier wrapper for rows in `projetos`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub String);

/// Lifecycle of a customer project from first quote to delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Orcamento,
    Vendido,
    EmProducao,
    Entregue,
    Cancelado,
}

impl ProjectStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Orcamento => "Orçamento",
            Self::Vendido => "Vendido",
            Self::EmProducao => "Em produção",
            Self::Entregue => "Entregue",
            Self::Cancelado => "Cancelado",
        }
    }

    /// Sold and delivered projects count as converted sales.
    pub const fn is_converted(self) -> bool {
        matches!(self, Self::Vendido | Self::Entregue)
    }

    /// Delivered and cancelled projects no longer owe a delivery date.
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Entregue | Self::Cancelado)
    }
}

/// Row of `projetos` as read from the data store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub user_id: OwnerId,
    #[serde(rename = "cliente_nome")]
    pub client_name: String,
    #[serde(rename = "ambiente", default)]
    pub environment: Option<String>,
    #[serde(rename = "origem_lead", default)]
    pub lead_origin: Option<String>,
    pub status: ProjectStatus,
    #[serde(rename = "data_primeiro_contato", default)]
    pub first_contact: Option<NaiveDate>,
    #[serde(rename = "data_entrega", default)]
    pub promised_delivery: Option<NaiveDate>,
    #[serde(rename = "data_venda", default)]
    pub sale_date: Option<NaiveDate>,
    #[serde(rename = "valor_venda", default)]
    pub sale_value: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductionStatus {
    Planejada,
    EmAndamento,
    Pausada,
    Concluida,
}

/// Row of `producoes`; at most one per project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Production {
    #[serde(rename = "projeto_id")]
    pub project_id: ProjectId,
    pub status: ProductionStatus,
    /// Percentage of output rejected or reworked.
    #[serde(rename = "taxa_rejeicao", default)]
    pub rejection_rate: Option<f64>,
    #[serde(rename = "data_prevista_fim", default)]
    pub expected_finish: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssemblyStatus {
    Agendada,
    EmAndamento,
    Concluida,
}

/// Row of `montagens`; at most one per project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assembly {
    #[serde(rename = "projeto_id")]
    pub project_id: ProjectId,
    pub status: AssemblyStatus,
    #[serde(rename = "desafios", default)]
    pub challenges: Option<String>,
    #[serde(rename = "data_montagem", default)]
    pub assembly_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QualityRating {
    Excelente,
    Bom,
    Regular,
    Ruim,
}

/// Row of `feedbacks`; at most one per project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    #[serde(rename = "projeto_id")]
    pub project_id: ProjectId,
    #[serde(rename = "recomendaria", default)]
    pub would_recommend: Option<bool>,
    #[serde(rename = "avaliacao_montagem", default)]
    pub assembly_rating: Option<QualityRating>,
    #[serde(rename = "avaliacao_fabricacao", default)]
    pub fabrication_rating: Option<QualityRating>,
}

/// A project joined with its optional production, assembly, and feedback rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSnapshot {
    pub project: Project,
    pub production: Option<Production>,
    pub assembly: Option<Assembly>,
    pub feedback: Option<Feedback>,
}

impl ProjectSnapshot {
    pub fn bare(project: Project) -> Self {
        Self {
            project,
            production: None,
            assembly: None,
            feedback: None,
        }
    }
}
