use super::format::{
    deserialize_optional_date, serialize_datetime, serialize_optional_date,
    serialize_optional_datetime,
};
use chrono::{NaiveDate, NaiveDateTime};
use mentorize_core::{
    Task, TaskCategory, TaskId, TaskInput, TaskPriority, TaskStats, ValidationError,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRequest {
    #[serde(default)]
    pub titulo: Option<String>,
    #[serde(default)]
    pub descricao: Option<String>,
    #[serde(default)]
    pub concluida: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub prazo: Option<NaiveDate>,
    #[serde(default)]
    pub prioridade: Option<String>,
    #[serde(default)]
    pub categoria: Option<String>,
}

impl TryFrom<TaskRequest> for TaskInput {
    type Error = ValidationError;

    fn try_from(value: TaskRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            title: value.titulo,
            description: value.descricao,
            completed: value.concluida,
            due_date: value.prazo,
            priority: value
                .prioridade
                .as_deref()
                .map(str::parse::<TaskPriority>)
                .transpose()?,
            category: value
                .categoria
                .as_deref()
                .map(str::parse::<TaskCategory>)
                .transpose()?,
        })
    }
}

/// Client-facing priority label; the accented medium goes out as `MÉDIA`.
pub fn priority_label(priority: TaskPriority) -> &'static str {
    match priority {
        TaskPriority::MediumAccented => "MÉDIA",
        other => other.as_str(),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: TaskId,
    pub titulo: String,
    pub descricao: Option<String>,
    pub concluida: bool,
    #[serde(serialize_with = "serialize_optional_date")]
    pub prazo: Option<NaiveDate>,
    pub prioridade: &'static str,
    pub categoria: &'static str,
    #[serde(serialize_with = "serialize_datetime")]
    pub data_criacao: NaiveDateTime,
    #[serde(serialize_with = "serialize_datetime")]
    pub data_atualizacao: NaiveDateTime,
    #[serde(serialize_with = "serialize_optional_datetime")]
    pub data_conclusao: Option<NaiveDateTime>,
    pub atrasada: bool,
    pub dias_ate_prazo: Option<i64>,
}

impl TaskResponse {
    /// Projects `task` with derived fields evaluated on `today`.
    pub fn on(task: Task, today: NaiveDate) -> Self {
        Self {
            id: task.id,
            concluida: task.is_completed(),
            prioridade: priority_label(task.priority),
            categoria: task.category.as_str(),
            data_conclusao: task.completed_at(),
            atrasada: task.is_overdue(today),
            dias_ate_prazo: task.days_until_due(today),
            titulo: task.title,
            descricao: task.description,
            prazo: task.due_date,
            data_criacao: task.created_at,
            data_atualizacao: task.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatsResponse {
    pub concluidas: i64,
    pub pendentes: i64,
}

impl From<TaskStats> for TaskStatsResponse {
    fn from(value: TaskStats) -> Self {
        Self {
            concluidas: value.completed,
            pendentes: value.pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{TaskRequest, TaskResponse};
    use chrono::NaiveDate;
    use mentorize_core::{TaskInput, TaskPriority, ValidationError};

    #[test]
    fn request_parses_enums_case_insensitively() {
        let request: TaskRequest = serde_json::from_str(
            r#"{"titulo":"x","prioridade":"média","categoria":"work","prazo":"2025-05-01"}"#,
        )
        .unwrap();
        let input = TaskInput::try_from(request).unwrap();
        assert_eq!(input.priority, Some(TaskPriority::MediumAccented));
        assert_eq!(
            input.due_date,
            Some(NaiveDate::from_ymd_opt(2025, 5, 1).unwrap())
        );
    }

    #[test]
    fn request_with_unknown_priority_is_a_validation_error() {
        let request: TaskRequest =
            serde_json::from_str(r#"{"titulo":"x","prioridade":"URGENTE"}"#).unwrap();
        let err = TaskInput::try_from(request).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownVariant { field: "priority", .. }));
    }

    #[test]
    fn blank_due_date_means_absent() {
        let request: TaskRequest = serde_json::from_str(r#"{"titulo":"x","prazo":""}"#).unwrap();
        assert_eq!(request.prazo, None);
    }

    #[test]
    fn response_uses_camel_case_wire_names() {
        let today = NaiveDate::from_ymd_opt(2025, 5, 10).unwrap();
        let now = today.and_hms_opt(8, 0, 0).unwrap();
        let mut task = mentorize_core::Task::new("Essay", now);
        task.priority = TaskPriority::MediumAccented;
        task.due_date = Some(NaiveDate::from_ymd_opt(2025, 5, 1).unwrap());

        let json = serde_json::to_value(TaskResponse::on(task, today)).unwrap();
        assert_eq!(json["prioridade"], "MÉDIA");
        assert_eq!(json["categoria"], "STUDY");
        assert_eq!(json["prazo"], "2025-05-01");
        assert_eq!(json["dataCriacao"], "2025-05-10 08:00:00");
        assert_eq!(json["dataConclusao"], serde_json::Value::Null);
        assert_eq!(json["atrasada"], true);
        assert_eq!(json["diasAtePrazo"], 0);
    }
}
