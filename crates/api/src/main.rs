use std::net::SocketAddr;
use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use artisan_api::config::ServerConfig;
use artisan_api::recaptcha::RecaptchaVerifier;
use artisan_api::router::build_app_router;
use artisan_api::state::AppState;
use artisan_db::repositories::{CatalogRepository, FixtureCatalog, PgCatalog};
use artisan_events::{BrevoContactSink, ContactSink, LogContactSink, ToastBus};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "artisan_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Catalog ---
    let catalog: Arc<dyn CatalogRepository> = match &config.database_url {
        Some(database_url) => {
            let pool = artisan_db::create_pool(database_url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Database connection pool created");

            artisan_db::health_check(&pool)
                .await
                .context("Database health check failed")?;

            artisan_db::run_migrations(&pool)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations applied");

            Arc::new(PgCatalog::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, serving the built-in fixture catalog");
            Arc::new(FixtureCatalog::seeded())
        }
    };

    // --- Contact delivery ---
    let contact_sink: Arc<dyn ContactSink> = match &config.brevo_api_key {
        Some(api_key) => {
            tracing::info!("Contacts will be forwarded to Brevo");
            Arc::new(BrevoContactSink::new(api_key.clone()).context("Failed to build CRM client")?)
        }
        None => {
            tracing::info!("BREVO_API_KEY not set, contacts will only be logged");
            Arc::new(LogContactSink)
        }
    };

    let recaptcha = match &config.recaptcha_secret {
        Some(secret) => Some(Arc::new(
            RecaptchaVerifier::new(secret.clone()).context("Failed to build reCAPTCHA client")?,
        )),
        None => {
            tracing::info!("RECAPTCHA_SECRET_KEY not set, contact submissions are not verified");
            None
        }
    };

    // --- App state ---
    let state = AppState {
        catalog,
        config: Arc::new(config.clone()),
        toasts: Arc::new(ToastBus::new()),
        contact_sink,
        recaptcha,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let host = config
        .host
        .parse()
        .with_context(|| format!("Invalid HOST address '{}'", config.host))?;
    let addr = SocketAddr::new(host, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    let shutdown = CancellationToken::new();
    let mut server = tokio::spawn(
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown.clone().cancelled_owned())
            .into_future(),
    );

    tokio::select! {
        joined = &mut server => {
            joined.context("Server task failed")?.context("Server error")?;
            return Ok(());
        }
        () = shutdown_signal() => {}
    }

    // --- Drain ---
    // Toast streams stay open until the client leaves, so in-flight
    // connections only get a bounded grace period.
    shutdown.cancel();
    let drain = Duration::from_secs(config.shutdown_timeout_secs);
    match tokio::time::timeout(drain, server).await {
        Ok(joined) => joined.context("Server task failed")?.context("Server error")?,
        Err(_) => tracing::warn!(
            timeout_secs = config.shutdown_timeout_secs,
            "Connections still open after shutdown timeout, closing them"
        ),
    }

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
