#![warn(clippy::pedantic, clippy::all, clippy::nursery)]
#![allow(clippy::single_match_else)]

use crate::{
    auth::postgres_store::PostgresSessionStore,
    config::RuntimeConfiguration,
    data::postgres::PostgresStudentStore,
    routes::build_app,
    state::{RegistrarState, open_database},
};
use axum_login::tower_sessions::ExpiredDeletion;
use sqlx::{Pool, Postgres, postgres::PgPoolOptions};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[macro_use]
extern crate tracing;

mod auth;
mod config;
mod data;
mod error;
mod flash;
mod maud_conveniences;
mod routes;
mod state;
#[cfg(test)]
mod tests;

async fn shutdown_signal(pool: Pool<Postgres>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    warn!("signal received, starting graceful shutdown");
    pool.close().await;
}

#[tokio::main]
async fn main() {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("not loading .env file: {e}");
    }

    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .finish(),
    )
    .expect("unable to set tracing subscriber");

    info!("`tracing` online");

    let config = RuntimeConfiguration::new().expect("unable to create config");
    let pool = open_database(PgPoolOptions::new().max_connections(15), &config)
        .await
        .expect("unable to open database");

    let session_store = PostgresSessionStore::new(pool.clone());
    if let Err(e) = session_store.delete_expired().await {
        error!(?e, "Error purging expired sessions");
    }

    let state = RegistrarState::new(
        Arc::new(PostgresStudentStore::new(pool.clone())),
        config.clone(),
    );
    let app = build_app(state, session_store);

    let server_ip = config.server_ip();
    let listener = TcpListener::bind(server_ip)
        .await
        .expect("unable to listen on server ip");

    info!(?server_ip, "Listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(pool))
        .await
        .expect("unable to serve app");
}
