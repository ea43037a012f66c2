//! HTTP surface for the Mentorize core.
//!
//! # Responsibility
//! - Own the shared SQLite connection and hand each request a service.
//! - Assemble routes, request logging and CORS into one router.
//! - Serve until Ctrl-C / SIGTERM.
//!
//! # Invariants
//! - One request holds the connection lock for exactly one service call.

pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod routes;

use crate::config::ServerConfig;
use crate::error::ApiError;
use anyhow::Context;
use axum::routing::get;
use axum::Router;
use log::info;
use mentorize_core::{
    GoalService, NoteService, ServiceResult, SqliteGoalRepository, SqliteNoteRepository,
    SqliteStudySessionRepository, SqliteTaskRepository, StudySessionService, TaskService,
};
use rusqlite::Connection;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Wraps a connection that already has migrations applied.
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
        }
    }

    pub async fn notes<T>(
        &self,
        f: impl FnOnce(&NoteService<SqliteNoteRepository<'_>>) -> ServiceResult<T>,
    ) -> Result<T, ApiError> {
        let conn = self.db.lock().await;
        let service = NoteService::new(SqliteNoteRepository::try_new(&conn)?);
        Ok(f(&service)?)
    }

    pub async fn study_sessions<T>(
        &self,
        f: impl FnOnce(&StudySessionService<SqliteStudySessionRepository<'_>>) -> ServiceResult<T>,
    ) -> Result<T, ApiError> {
        let conn = self.db.lock().await;
        let service = StudySessionService::new(SqliteStudySessionRepository::try_new(&conn)?);
        Ok(f(&service)?)
    }

    pub async fn goals<T>(
        &self,
        f: impl FnOnce(&GoalService<SqliteGoalRepository<'_>>) -> ServiceResult<T>,
    ) -> Result<T, ApiError> {
        let conn = self.db.lock().await;
        let service = GoalService::new(SqliteGoalRepository::try_new(&conn)?);
        Ok(f(&service)?)
    }

    pub async fn tasks<T>(
        &self,
        f: impl FnOnce(&TaskService<SqliteTaskRepository<'_>>) -> ServiceResult<T>,
    ) -> Result<T, ApiError> {
        let conn = self.db.lock().await;
        let service = TaskService::new(SqliteTaskRepository::try_new(&conn)?);
        Ok(f(&service)?)
    }
}

/// Build the axum Router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(routes::api_router())
        .layer(axum::middleware::from_fn(middleware::log_request))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Opens the database, binds the listener and serves until shutdown.
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let conn = mentorize_core::open_db(&config.db_path)
        .with_context(|| format!("failed to open database `{}`", config.db_path.display()))?;
    let app = build_router(AppState::new(conn));

    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("event=server_listen module=server status=ok addr={addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated unexpectedly")?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            log::error!("event=shutdown_signal module=server status=error signal=ctrl_c error={err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                log::error!(
                    "event=shutdown_signal module=server status=error signal=sigterm error={err}"
                );
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("event=shutdown_signal module=server status=ok");
}
