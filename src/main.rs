//src/main.rs

use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod routes;
mod services;

use crate::config::{AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG controla o nível; por padrão, "info".
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let config = Config::from_env()?;

    let db_pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(3))
        .connect(&config.database_url)
        .await?;
    tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

    // Faz o app rodar as migrações do SQLx na inicialização
    sqlx::migrate!().run(&db_pool).await?;
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let addr = format!("0.0.0.0:{}", config.port);
    let app = routes::build_router(AppState::from_pool(&config, db_pool));

    // Inicia o servidor
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("👋 Servidor encerrado.");
    Ok(())
}

// Ctrl-C ou SIGTERM (docker stop)
async fn shutdown_signal() {
    let ctrl_c = signal_or_pending("Ctrl-C", tokio::signal::ctrl_c());

    #[cfg(unix)]
    let terminate = signal_or_pending("SIGTERM", async {
        let mut signal = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
        signal.recv().await;
        Ok::<(), std::io::Error>(())
    });

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Completa quando o sinal chega. Se não der para escutá-lo, nunca completa:
/// uma falha de registro não pode derrubar o servidor.
async fn signal_or_pending<F>(name: &str, signal: F)
where
    F: std::future::Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        tracing::error!("Falha ao escutar {}: {}", name, e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn failed_signal_registration_never_triggers_shutdown() {
        let failing = async { Err::<(), _>(std::io::Error::other("sem suporte a sinais")) };
        let waited = tokio::time::timeout(Duration::from_millis(50), signal_or_pending("SIGTERM", failing)).await;

        assert!(waited.is_err(), "o servidor não pode encerrar sozinho");
    }

    #[tokio::test]
    async fn received_signal_triggers_shutdown() {
        let received = async { Ok::<(), std::io::Error>(()) };
        let waited = tokio::time::timeout(Duration::from_millis(50), signal_or_pending("SIGTERM", received)).await;

        assert!(waited.is_ok());
    }
}
