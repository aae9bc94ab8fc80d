use std::path::Path;
use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;

mod config;
mod error;
mod handlers;
mod models;
mod seed;
mod store;

use crate::config::Config;
use crate::store::MedicineStore;

/// Shared application state — cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MedicineStore>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,medicine_service=debug")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;

    anyhow::ensure!(
        config.frontend_dir.is_dir(),
        "Frontend directory '{}' does not exist!",
        config.frontend_dir.display()
    );

    let store = Arc::new(MedicineStore::new(config.data_file.clone()));
    if config.seed_if_missing {
        seed::seed_if_missing(&store).await?;
    }
    if !store.exists().await {
        info!(
            path = %store.path().display(),
            "Store file not found; catalog routes answer 404 until it is created"
        );
    }

    let app = build_router(AppState { store }, &config.frontend_dir);

    let addr = format!("{}:{}", config.host, config.port);
    info!("Listening on http://{}", addr);
    info!("Frontend at http://{}/frontend/", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

fn build_router(state: AppState, frontend_dir: &Path) -> Router {
    Router::new()
        // ── Health ──────────────────────────────────────────────────────────
        .route("/health", get(handlers::health))

        // ── Medicines ───────────────────────────────────────────────────────
        .route("/medicines", get(handlers::medicines::list_medicines))
        .route("/medicines/average", get(handlers::medicines::average_price))
        .route("/medicines/:name", get(handlers::medicines::get_medicine))
        .route("/create", post(handlers::medicines::create_medicine))
        .route("/update", post(handlers::medicines::update_medicine))
        .route("/delete", delete(handlers::medicines::delete_medicine))

        // ── Static frontend ─────────────────────────────────────────────────
        .nest_service("/frontend", ServeDir::new(frontend_dir))

        // ── Middleware ──────────────────────────────────────────────────────
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received");
}
