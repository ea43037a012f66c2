use crate::dto::task::{TaskRequest, TaskResponse, TaskStatsResponse};
use crate::error::ApiError;
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, put};
use axum::{Json, Router};
use mentorize_core::{current_timestamp, Task, TaskCategory, TaskId, TaskInput, TaskPriority};
use serde::Deserialize;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tarefas", get(list_tasks).post(create_task))
        .route("/tarefas/id/{id}", get(get_task))
        .route("/tarefas/{id}", put(update_task).delete(delete_task))
        .route("/tarefas/pendentes", get(pending_tasks))
        .route("/tarefas/prioridade/{prioridade}", get(tasks_by_priority))
        .route("/tarefas/categoria/{categoria}", get(tasks_by_category))
        .route("/tarefas/com-prazo", get(tasks_with_due_date))
        .route("/tarefas/atrasadas", get(overdue_tasks))
        .route("/tarefas/buscar", get(search_tasks))
        .route("/tarefas/{id}/concluir", patch(complete_task))
        .route("/tarefas/{id}/reabrir", patch(reopen_task))
        .route("/tarefas/estatisticas", get(task_stats))
}

#[derive(Deserialize)]
struct TermQuery {
    termo: String,
}

type TaskList = Json<Vec<TaskResponse>>;

fn to_response(task: Task) -> Json<TaskResponse> {
    Json(TaskResponse::on(task, current_timestamp().date()))
}

fn to_responses(tasks: Vec<Task>) -> TaskList {
    let today = current_timestamp().date();
    Json(
        tasks
            .into_iter()
            .map(|task| TaskResponse::on(task, today))
            .collect(),
    )
}

async fn list_tasks(State(state): State<AppState>) -> Result<TaskList, ApiError> {
    let tasks = state.tasks(|service| service.list_tasks()).await?;
    Ok(to_responses(tasks))
}

async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<TaskId>,
) -> Result<Json<TaskResponse>, ApiError> {
    let task = state.tasks(|service| service.get_task(id)).await?;
    Ok(to_response(task))
}

async fn create_task(
    State(state): State<AppState>,
    Json(body): Json<TaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiError> {
    let input = TaskInput::try_from(body)?;
    let task = state
        .tasks(move |service| service.create_task(input))
        .await?;
    Ok((StatusCode::CREATED, to_response(task)))
}

async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<TaskId>,
    Json(body): Json<TaskRequest>,
) -> Result<Json<TaskResponse>, ApiError> {
    let input = TaskInput::try_from(body)?;
    let task = state
        .tasks(move |service| service.update_task(id, input))
        .await?;
    Ok(to_response(task))
}

async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<TaskId>,
) -> Result<StatusCode, ApiError> {
    state.tasks(|service| service.delete_task(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn pending_tasks(State(state): State<AppState>) -> Result<TaskList, ApiError> {
    let tasks = state.tasks(|service| service.pending_tasks()).await?;
    Ok(to_responses(tasks))
}

async fn tasks_by_priority(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<TaskList, ApiError> {
    let priority: TaskPriority = raw.parse()?;
    let tasks = state
        .tasks(|service| service.tasks_by_priority(priority))
        .await?;
    Ok(to_responses(tasks))
}

async fn tasks_by_category(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<TaskList, ApiError> {
    let category: TaskCategory = raw.parse()?;
    let tasks = state
        .tasks(|service| service.tasks_by_category(category))
        .await?;
    Ok(to_responses(tasks))
}

async fn tasks_with_due_date(State(state): State<AppState>) -> Result<TaskList, ApiError> {
    let tasks = state.tasks(|service| service.tasks_with_due_date()).await?;
    Ok(to_responses(tasks))
}

async fn overdue_tasks(State(state): State<AppState>) -> Result<TaskList, ApiError> {
    let tasks = state.tasks(|service| service.overdue_tasks()).await?;
    Ok(to_responses(tasks))
}

async fn search_tasks(
    State(state): State<AppState>,
    Query(query): Query<TermQuery>,
) -> Result<TaskList, ApiError> {
    let tasks = state
        .tasks(|service| service.search_tasks(&query.termo))
        .await?;
    Ok(to_responses(tasks))
}

async fn complete_task(
    State(state): State<AppState>,
    Path(id): Path<TaskId>,
) -> Result<Json<TaskResponse>, ApiError> {
    let task = state.tasks(|service| service.complete_task(id)).await?;
    Ok(to_response(task))
}

async fn reopen_task(
    State(state): State<AppState>,
    Path(id): Path<TaskId>,
) -> Result<Json<TaskResponse>, ApiError> {
    let task = state.tasks(|service| service.reopen_task(id)).await?;
    Ok(to_response(task))
}

async fn task_stats(State(state): State<AppState>) -> Result<Json<TaskStatsResponse>, ApiError> {
    let stats = state.tasks(|service| service.task_stats()).await?;
    Ok(Json(stats.into()))
}
