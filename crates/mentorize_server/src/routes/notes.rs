use crate::dto::note::{NoteRequest, NoteResponse};
use crate::error::ApiError;
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use mentorize_core::{Note, NoteId};
use serde::Deserialize;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/anotacoes", get(list_notes).post(create_note))
        .route("/anotacoes/id/{id}", get(get_note))
        .route("/anotacoes/{id}", put(update_note).delete(delete_note))
        .route("/anotacoes/buscar", get(search_by_title))
        .route("/anotacoes/pesquisar", get(search_by_content))
        .route("/anotacoes/recentes", get(recent_notes))
        .route("/anotacoes/contagem", get(count_notes))
}

#[derive(Deserialize)]
struct TitleQuery {
    titulo: String,
}

#[derive(Deserialize)]
struct TermQuery {
    termo: String,
}

fn to_responses(notes: Vec<Note>) -> Json<Vec<NoteResponse>> {
    Json(notes.into_iter().map(NoteResponse::from).collect())
}

async fn list_notes(State(state): State<AppState>) -> Result<Json<Vec<NoteResponse>>, ApiError> {
    let notes = state.notes(|service| service.list_notes()).await?;
    Ok(to_responses(notes))
}

async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<NoteId>,
) -> Result<Json<NoteResponse>, ApiError> {
    let note = state.notes(|service| service.get_note(id)).await?;
    Ok(Json(note.into()))
}

async fn create_note(
    State(state): State<AppState>,
    Json(body): Json<NoteRequest>,
) -> Result<(StatusCode, Json<NoteResponse>), ApiError> {
    let note = state
        .notes(move |service| service.create_note(body.into()))
        .await?;
    Ok((StatusCode::CREATED, Json(note.into())))
}

async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<NoteId>,
    Json(body): Json<NoteRequest>,
) -> Result<Json<NoteResponse>, ApiError> {
    let note = state
        .notes(move |service| service.update_note(id, body.into()))
        .await?;
    Ok(Json(note.into()))
}

async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<NoteId>,
) -> Result<StatusCode, ApiError> {
    state.notes(|service| service.delete_note(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn search_by_title(
    State(state): State<AppState>,
    Query(query): Query<TitleQuery>,
) -> Result<Json<Vec<NoteResponse>>, ApiError> {
    let notes = state
        .notes(|service| service.search_by_title(&query.titulo))
        .await?;
    Ok(to_responses(notes))
}

async fn search_by_content(
    State(state): State<AppState>,
    Query(query): Query<TermQuery>,
) -> Result<Json<Vec<NoteResponse>>, ApiError> {
    let notes = state
        .notes(|service| service.search_by_content(&query.termo))
        .await?;
    Ok(to_responses(notes))
}

async fn recent_notes(State(state): State<AppState>) -> Result<Json<Vec<NoteResponse>>, ApiError> {
    let notes = state.notes(|service| service.recent_notes()).await?;
    Ok(to_responses(notes))
}

async fn count_notes(State(state): State<AppState>) -> Result<Json<i64>, ApiError> {
    let count = state.notes(|service| service.count_notes()).await?;
    Ok(Json(count))
}
