use super::format::{deserialize_optional_date, serialize_datetime, serialize_optional_date};
use chrono::{NaiveDate, NaiveDateTime};
use mentorize_core::{StudySession, StudySessionId, StudySessionInput, SubjectCount};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySessionRequest {
    #[serde(default)]
    pub titulo: Option<String>,
    #[serde(default)]
    pub descricao: Option<String>,
    #[serde(default)]
    pub materia: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub prazo: Option<NaiveDate>,
    #[serde(default)]
    pub concluido: Option<bool>,
    /// Minutes.
    #[serde(default)]
    pub duracao: Option<i64>,
    #[serde(default)]
    pub anotacoes: Option<String>,
}

impl From<StudySessionRequest> for StudySessionInput {
    fn from(value: StudySessionRequest) -> Self {
        Self {
            title: value.titulo,
            description: value.descricao,
            subject: value.materia,
            due_date: value.prazo,
            completed: value.concluido,
            duration_minutes: value.duracao,
            notes: value.anotacoes,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySessionResponse {
    pub id: StudySessionId,
    pub titulo: String,
    pub descricao: Option<String>,
    pub materia: String,
    #[serde(serialize_with = "serialize_optional_date")]
    pub prazo: Option<NaiveDate>,
    pub concluido: bool,
    pub duracao: i64,
    pub anotacoes: Option<String>,
    #[serde(serialize_with = "serialize_datetime")]
    pub data_criacao: NaiveDateTime,
}

impl From<StudySession> for StudySessionResponse {
    fn from(value: StudySession) -> Self {
        Self {
            id: value.id,
            titulo: value.title,
            descricao: value.description,
            materia: value.subject,
            prazo: value.due_date,
            concluido: value.completed,
            duracao: value.duration_minutes,
            anotacoes: value.notes,
            data_criacao: value.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectCountResponse {
    pub materia: String,
    pub quantidade: i64,
}

impl From<SubjectCount> for SubjectCountResponse {
    fn from(value: SubjectCount) -> Self {
        Self {
            materia: value.subject,
            quantidade: value.sessions,
        }
    }
}
