//! Student records server.
//!
//! Run from repo root: `cargo run -p student-server`
//! Settings come from the environment (and `.env`); `STUDENT_STORE=memory` runs without PostgreSQL.

use std::sync::Arc;
use student_service::{
    app, connect, ensure_database_exists, ensure_student_table, AppState, InMemoryStudentRepository,
    PgStudentRepository, ServerConfig, StoreBackend, StudentRepository,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Loads .env as well, so RUST_LOG from it reaches the filter below.
    let config = ServerConfig::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("student_service=info,student_server=info,tower_http=info")
            }),
        )
        .init();

    let repo: Arc<dyn StudentRepository> = match config.store {
        StoreBackend::Postgres => {
            ensure_database_exists(&config.database_url).await?;
            let pool = connect(&config).await?;
            ensure_student_table(&pool, &config.schema).await?;
            Arc::new(PgStudentRepository::new(pool, &config.schema))
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory student store; records are lost on restart");
            Arc::new(InMemoryStudentRepository::new())
        }
    };

    let router = app(AppState::new(repo), config.body_limit);
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("student server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
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
    tracing::info!("shutting down");
}
