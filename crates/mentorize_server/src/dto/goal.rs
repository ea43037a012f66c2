use super::format::{
    deserialize_optional_datetime, serialize_datetime, serialize_optional_datetime,
};
use chrono::NaiveDateTime;
use mentorize_core::{Goal, GoalId, GoalInput, GoalStats};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalRequest {
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub descricao: Option<String>,
    #[serde(default)]
    pub progresso: Option<i64>,
    /// Free-text category tag.
    #[serde(default)]
    pub tipo: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub data_limite: Option<NaiveDateTime>,
    #[serde(default)]
    pub concluida: Option<bool>,
}

impl From<GoalRequest> for GoalInput {
    fn from(value: GoalRequest) -> Self {
        Self {
            name: value.nome,
            description: value.descricao,
            progress: value.progresso,
            category: value.tipo,
            due_date: value.data_limite,
            completed: value.concluida,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalResponse {
    pub id: GoalId,
    pub nome: String,
    pub descricao: Option<String>,
    pub progresso: i64,
    pub tipo: Option<String>,
    #[serde(serialize_with = "serialize_datetime")]
    pub data_inicio: NaiveDateTime,
    #[serde(serialize_with = "serialize_optional_datetime")]
    pub data_limite: Option<NaiveDateTime>,
    pub concluida: bool,
    pub dias_restantes: Option<i64>,
    pub atrasada: bool,
}

impl GoalResponse {
    /// Projects `goal` with derived fields evaluated at `now`.
    pub fn at(goal: Goal, now: NaiveDateTime) -> Self {
        Self {
            id: goal.id,
            progresso: goal.progress(),
            concluida: goal.is_completed(),
            dias_restantes: goal.days_remaining(now),
            atrasada: goal.is_overdue(now),
            nome: goal.name,
            descricao: goal.description,
            tipo: goal.category,
            data_inicio: goal.start_date,
            data_limite: goal.due_date,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalStatsResponse {
    pub total: i64,
    pub concluidas: i64,
    /// Average progress over goals still open; `null` when none are open.
    pub progresso_medio_ativas: Option<f64>,
}

impl From<GoalStats> for GoalStatsResponse {
    fn from(value: GoalStats) -> Self {
        Self {
            total: value.total,
            concluidas: value.completed,
            progresso_medio_ativas: value.average_active_progress,
        }
    }
}
