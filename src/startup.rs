//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{extract::DefaultBodyLimit, middleware, Router};
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;

use crate::application::services::{InviteService, InviteServiceImpl};
use crate::config::{Settings, StorageBackend};
use crate::domain::InviteRepository;
use crate::infrastructure::database;
use crate::infrastructure::repositories::{InMemoryInviteRepository, PgInviteRepository};
use crate::presentation::http::handlers::health;
use crate::presentation::http::routes;
use crate::presentation::middleware::{cors, logging, security_headers, SecurityHeadersConfig};
use crate::shared::slug::SlugGenerator;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub invites: Arc<dyn InviteService>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Wire the invite service over the given store.
    pub fn new(store: Arc<dyn InviteRepository>, settings: Settings) -> Self {
        Self {
            invites: Arc::new(InviteServiceImpl::new(store)),
            settings: Arc::new(settings),
        }
    }
}

/// Build the router with the full middleware stack
pub fn build_router(state: AppState) -> Router {
    let settings = state.settings.clone();
    let security = SecurityHeadersConfig::for_environment(&settings.environment);

    routes::create_router(state)
        .layer(middleware::from_fn(logging::track_metrics))
        .layer(DefaultBodyLimit::max(settings.server.max_body_bytes))
        .layer(middleware::from_fn_with_state(security, security_headers))
        .layer(logging::create_trace_layer())
        .layer(cors::create_cors_layer(&settings.cors))
        .layer(CatchPanicLayer::new())
}

/// Create the invite store selected by configuration
async fn create_store(settings: &Settings) -> Result<Arc<dyn InviteRepository>> {
    let slugs = Arc::new(SlugGenerator::default());

    match settings.storage.backend {
        StorageBackend::Postgres => {
            let url = settings
                .database
                .url
                .as_deref()
                .context("database.url is not configured")?;
            let pool = database::create_pool(&settings.database, url).await?;
            tracing::info!("Database connection pool created");

            if settings.database.run_migrations {
                database::run_migrations(&pool).await?;
                tracing::info!("Database migrations applied");
            }

            Ok(Arc::new(PgInviteRepository::new(pool, slugs)))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory invite store; data is lost on restart");
            Ok(Arc::new(InMemoryInviteRepository::new(slugs)))
        }
    }
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        health::init_server_start();

        let store = create_store(&settings).await?;

        let listener = TcpListener::bind((settings.server.host.as_str(), settings.server.port))
            .await
            .with_context(|| format!("Failed to bind {}", settings.server_addr()))?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        let router = build_router(AppState::new(store, settings));

        Ok(Self { listener, router })
    }

    /// Run the server until a shutdown signal arrives
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        tracing::info!("Server stopped");
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

/// Resolve on Ctrl-C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = await_signal("Ctrl-C", tokio::signal::ctrl_c());

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    tracing::info!("Shutdown signal received");
}

/// Wait for a signal listener; a listener that fails to install never fires.
async fn await_signal<F>(name: &str, signal: F)
where
    F: std::future::Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        tracing::error!("Failed to listen for {}: {}", name, e);
        std::future::pending::<()>().await;
    }
}
