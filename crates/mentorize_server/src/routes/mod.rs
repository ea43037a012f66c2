//! Resource routers, one per entity.
//!
//! Base paths keep the Portuguese resource names the web front-end calls.

pub mod goals;
pub mod notes;
pub mod study_sessions;
pub mod tasks;

use crate::AppState;
use axum::Router;

pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(notes::router())
        .merge(study_sessions::router())
        .merge(goals::router())
        .merge(tasks::router())
}
