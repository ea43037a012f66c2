use crate::dto::goal::{GoalRequest, GoalResponse, GoalStatsResponse};
use crate::error::ApiError;
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, put};
use axum::{Json, Router};
use mentorize_core::{current_timestamp, Goal, GoalId};
use serde::Deserialize;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/metas", get(list_goals).post(create_goal))
        .route("/metas/id/{id}", get(get_goal))
        .route("/metas/{id}", put(update_goal).delete(delete_goal))
        .route("/metas/pendentes", get(pending_goals))
        .route("/metas/tipo/{tipo}", get(goals_by_category))
        .route("/metas/atrasadas", get(overdue_goals))
        .route("/metas/{id}/progresso", patch(set_progress))
        .route("/metas/{id}/concluir", patch(complete_goal))
        .route("/metas/estatisticas", get(goal_stats))
}

#[derive(Deserialize)]
struct ProgressQuery {
    progresso: i64,
}

type GoalList = Json<Vec<GoalResponse>>;

fn to_response(goal: Goal) -> Json<GoalResponse> {
    Json(GoalResponse::at(goal, current_timestamp()))
}

fn to_responses(goals: Vec<Goal>) -> GoalList {
    let now = current_timestamp();
    Json(
        goals
            .into_iter()
            .map(|goal| GoalResponse::at(goal, now))
            .collect(),
    )
}

async fn list_goals(State(state): State<AppState>) -> Result<GoalList, ApiError> {
    let goals = state.goals(|service| service.list_goals()).await?;
    Ok(to_responses(goals))
}

async fn get_goal(
    State(state): State<AppState>,
    Path(id): Path<GoalId>,
) -> Result<Json<GoalResponse>, ApiError> {
    let goal = state.goals(|service| service.get_goal(id)).await?;
    Ok(to_response(goal))
}

async fn create_goal(
    State(state): State<AppState>,
    Json(body): Json<GoalRequest>,
) -> Result<(StatusCode, Json<GoalResponse>), ApiError> {
    let goal = state
        .goals(move |service| service.create_goal(body.into()))
        .await?;
    Ok((StatusCode::CREATED, to_response(goal)))
}

async fn update_goal(
    State(state): State<AppState>,
    Path(id): Path<GoalId>,
    Json(body): Json<GoalRequest>,
) -> Result<Json<GoalResponse>, ApiError> {
    let goal = state
        .goals(move |service| service.update_goal(id, body.into()))
        .await?;
    Ok(to_response(goal))
}

async fn delete_goal(
    State(state): State<AppState>,
    Path(id): Path<GoalId>,
) -> Result<StatusCode, ApiError> {
    state.goals(|service| service.delete_goal(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn pending_goals(State(state): State<AppState>) -> Result<GoalList, ApiError> {
    let goals = state.goals(|service| service.pending_goals()).await?;
    Ok(to_responses(goals))
}

async fn goals_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<GoalList, ApiError> {
    let goals = state
        .goals(|service| service.goals_by_category(&category))
        .await?;
    Ok(to_responses(goals))
}

async fn overdue_goals(State(state): State<AppState>) -> Result<GoalList, ApiError> {
    let goals = state.goals(|service| service.overdue_goals()).await?;
    Ok(to_responses(goals))
}

/// Out-of-range values are clamped, not rejected.
async fn set_progress(
    State(state): State<AppState>,
    Path(id): Path<GoalId>,
    Query(query): Query<ProgressQuery>,
) -> Result<Json<GoalResponse>, ApiError> {
    let goal = state
        .goals(|service| service.set_goal_progress(id, query.progresso))
        .await?;
    Ok(to_response(goal))
}

async fn complete_goal(
    State(state): State<AppState>,
    Path(id): Path<GoalId>,
) -> Result<Json<GoalResponse>, ApiError> {
    let goal = state.goals(|service| service.complete_goal(id)).await?;
    Ok(to_response(goal))
}

async fn goal_stats(State(state): State<AppState>) -> Result<Json<GoalStatsResponse>, ApiError> {
    let stats = state.goals(|service| service.goal_stats()).await?;
    Ok(Json(stats.into()))
}
