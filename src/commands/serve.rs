//! Serve command - starts the HTTP server.

use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, UploadStore};
use crate::notify::Mailer;

/// Execute the serve command
pub async fn execute(args: ServeArgs, config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    // Initialize database (runs pending migrations)
    let db = Arc::new(Database::connect(&config).await);
    tracing::info!("Database connected");

    // Upload root for resumes, logos, and avatars
    let uploads = Arc::new(UploadStore::new(config.upload_root.clone())?);

    // The mailer is built once here and injected everywhere
    let notifier = Arc::new(Mailer::new(config.smtp.clone()));
    if !config.smtp.is_configured() {
        tracing::warn!("SMTP not configured; notifications will be logged, not sent");
    }

    let app_state = AppState::from_config(db, uploads, notifier, config);

    let app = create_router(app_state);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}
