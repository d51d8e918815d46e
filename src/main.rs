use crate::config::CoursesConfig;
use crate::database::sqlite::SqliteRepository;
use crate::database::{CourseRepository, StudentRepository};
use anyhow::Context;
use axum::Router;
use sqlx::Sqlite;
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tokio::signal;
use tower_http::trace::TraceLayer;

pub mod config;
mod database;
mod domain;
mod error;
mod features;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub courses: Arc<dyn CourseRepository>,
    pub students: Arc<dyn StudentRepository>,
}

impl AppState {
    pub fn from_repository<R>(repo: Arc<R>) -> Self
    where
        R: CourseRepository + StudentRepository + 'static,
    {
        Self {
            courses: repo.clone(),
            students: repo,
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", features::api_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,courses_server=debug,tower_http=debug".into()),
        )
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install CTRL+C handler");
    }
    tracing::info!("shutting down gracefully");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // determine environment variables
    dotenv::dotenv().ok();
    init_tracing();

    let config = CoursesConfig::from_env()?;

    // verify db exists
    if !Sqlite::database_exists(&config.database_url)
        .await
        .unwrap_or(false)
    {
        tracing::info!(url = %config.database_url, "database missing, creating");
        Sqlite::create_database(&config.database_url)
            .await
            .with_context(|| format!("Unable to create database at {}", config.database_url))?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .with_context(|| format!("Failed to create pool on {}", config.database_url))?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    let state = AppState::from_repository(Arc::new(SqliteRepository::new(pool)));

    let listener = tokio::net::TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;
    tracing::info!(addr = %config.bind_address, "server listening");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
