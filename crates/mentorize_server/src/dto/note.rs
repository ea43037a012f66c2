use super::format::serialize_datetime;
use chrono::NaiveDateTime;
use mentorize_core::{Note, NoteId, NoteInput};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRequest {
    #[serde(default)]
    pub titulo: Option<String>,
    #[serde(default)]
    pub conteudo: Option<String>,
}

impl From<NoteRequest> for NoteInput {
    fn from(value: NoteRequest) -> Self {
        Self {
            title: value.titulo,
            content: value.conteudo,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponse {
    pub id: NoteId,
    pub titulo: String,
    pub conteudo: Option<String>,
    #[serde(serialize_with = "serialize_datetime")]
    pub data_criacao: NaiveDateTime,
    #[serde(serialize_with = "serialize_datetime")]
    pub data_atualizacao: NaiveDateTime,
}

impl From<Note> for NoteResponse {
    fn from(value: Note) -> Self {
        Self {
            id: value.id,
            titulo: value.title,
            conteudo: value.content,
            data_criacao: value.created_at,
            data_atualizacao: value.updated_at,
        }
    }
}
