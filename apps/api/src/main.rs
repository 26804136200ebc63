mod auth;
mod config;
mod errors;
mod listings;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::local::LocalAuthProvider;
use crate::auth::remote::RemoteAuthProvider;
use crate::auth::{watch_session, AuthProvider};
use crate::config::{AuthMode, Config};
use crate::listings::seed::sample_jobs;
use crate::listings::store::JobStore;
use crate::models::user::UserIdentity;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Job Board API v{}", env!("CARGO_PKG_VERSION"));

    let seed = if config.seed_sample_jobs {
        sample_jobs()
    } else {
        Vec::new()
    };
    let jobs = Arc::new(JobStore::new(seed));
    info!("Job board loaded with {} postings", jobs.len());

    let auth = build_auth_provider(&config.auth)?;

    // Subscribe on startup; the observer ends when the provider is dropped at shutdown.
    let observer = tokio::spawn(watch_session(auth.subscribe()));

    let state = AppState { jobs, auth };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    observer.abort();
    info!("Job Board API stopped");
    Ok(())
}

fn build_auth_provider(mode: &AuthMode) -> Result<Arc<dyn AuthProvider>> {
    match mode {
        AuthMode::Local {
            user_id,
            display_name,
            email,
        } => {
            info!("Auth provider: local (user {user_id})");
            Ok(Arc::new(LocalAuthProvider::new(UserIdentity {
                id: user_id.clone(),
                display_name: display_name.clone(),
                email: email.clone(),
            })))
        }
        AuthMode::Remote { url, token } => {
            info!("Auth provider: remote ({url})");
            Ok(Arc::new(RemoteAuthProvider::new(url.clone(), token.clone())?))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
