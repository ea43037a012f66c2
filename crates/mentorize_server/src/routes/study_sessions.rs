use crate::dto::study::{StudySessionRequest, StudySessionResponse, SubjectCountResponse};
use crate::error::ApiError;
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, put};
use axum::{Json, Router};
use mentorize_core::{StudySession, StudySessionId};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/estudos", get(list_sessions).post(create_session))
        .route("/estudos/id/{id}", get(get_session))
        .route("/estudos/{id}", put(update_session).delete(delete_session))
        .route("/estudos/pendentes", get(pending_sessions))
        .route("/estudos/materia/{materia}", get(sessions_by_subject))
        .route("/estudos/recentes", get(recent_sessions))
        .route("/estudos/{id}/concluir", patch(complete_session))
        .route("/estudos/estatisticas/tempo-total", get(total_minutes))
        .route("/estudos/estatisticas/concluidos", get(completed_count))
        .route("/estudos/estatisticas/duracao-media", get(average_minutes))
        .route("/estudos/estatisticas/por-materia", get(count_by_subject))
}

type SessionList = Json<Vec<StudySessionResponse>>;

fn to_responses(sessions: Vec<StudySession>) -> SessionList {
    Json(sessions.into_iter().map(StudySessionResponse::from).collect())
}

async fn list_sessions(State(state): State<AppState>) -> Result<SessionList, ApiError> {
    let sessions = state.study_sessions(|service| service.list_sessions()).await?;
    Ok(to_responses(sessions))
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<StudySessionId>,
) -> Result<Json<StudySessionResponse>, ApiError> {
    let session = state.study_sessions(|service| service.get_session(id)).await?;
    Ok(Json(session.into()))
}

async fn create_session(
    State(state): State<AppState>,
    Json(body): Json<StudySessionRequest>,
) -> Result<(StatusCode, Json<StudySessionResponse>), ApiError> {
    let session = state
        .study_sessions(move |service| service.create_session(body.into()))
        .await?;
    Ok((StatusCode::CREATED, Json(session.into())))
}

async fn update_session(
    State(state): State<AppState>,
    Path(id): Path<StudySessionId>,
    Json(body): Json<StudySessionRequest>,
) -> Result<Json<StudySessionResponse>, ApiError> {
    let session = state
        .study_sessions(move |service| service.update_session(id, body.into()))
        .await?;
    Ok(Json(session.into()))
}

async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<StudySessionId>,
) -> Result<StatusCode, ApiError> {
    state
        .study_sessions(|service| service.delete_session(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn pending_sessions(State(state): State<AppState>) -> Result<SessionList, ApiError> {
    let sessions = state
        .study_sessions(|service| service.pending_sessions())
        .await?;
    Ok(to_responses(sessions))
}

async fn sessions_by_subject(
    State(state): State<AppState>,
    Path(subject): Path<String>,
) -> Result<SessionList, ApiError> {
    let sessions = state
        .study_sessions(|service| service.sessions_by_subject(&subject))
        .await?;
    Ok(to_responses(sessions))
}

async fn recent_sessions(State(state): State<AppState>) -> Result<SessionList, ApiError> {
    let sessions = state
        .study_sessions(|service| service.recent_sessions())
        .await?;
    Ok(to_responses(sessions))
}

async fn complete_session(
    State(state): State<AppState>,
    Path(id): Path<StudySessionId>,
) -> Result<Json<StudySessionResponse>, ApiError> {
    let session = state
        .study_sessions(|service| service.complete_session(id))
        .await?;
    Ok(Json(session.into()))
}

async fn total_minutes(State(state): State<AppState>) -> Result<Json<i64>, ApiError> {
    let total = state
        .study_sessions(|service| service.total_completed_minutes())
        .await?;
    Ok(Json(total))
}

async fn completed_count(State(state): State<AppState>) -> Result<Json<i64>, ApiError> {
    let count = state
        .study_sessions(|service| service.count_completed())
        .await?;
    Ok(Json(count))
}

async fn average_minutes(State(state): State<AppState>) -> Result<Json<Option<f64>>, ApiError> {
    let average = state
        .study_sessions(|service| service.average_completed_minutes())
        .await?;
    Ok(Json(average))
}

async fn count_by_subject(
    State(state): State<AppState>,
) -> Result<Json<Vec<SubjectCountResponse>>, ApiError> {
    let counts = state
        .study_sessions(|service| service.count_by_subject())
        .await?;
    Ok(Json(counts.into_iter().map(SubjectCountResponse::from).collect()))
}
