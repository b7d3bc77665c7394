use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::info;

use game_core::{ExerciseLibrary, GameCatalog};
use game_persistence::{
    connection::connect_and_migrate,
    repositories::{ProgressRepository, UserRepository},
};
use game_server::{
    auth::AuthService, config::Config, create_routes, progress_recorder::run_progress_recorder,
    session_manager::SessionManager,
};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Eco Arcade server...");

    let config = Config::new();

    let catalog = match load_catalog(config.game_catalog_path.as_deref()) {
        Ok(catalog) => {
            info!("Loaded {} games", catalog.len());
            Arc::new(catalog)
        }
        Err(e) => {
            tracing::error!("Failed to load game catalog: {}", e);
            tracing::error!("Check GAME_CATALOG_PATH or unset it to use the built-in games.");
            std::process::exit(1);
        }
    };

    // Initialize database connection and run migrations
    let db = match connect_and_migrate(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to connect to database and run migrations: {}", e);
            std::process::exit(1);
        }
    };
    let user_repository = Arc::new(UserRepository::new(db.clone()));
    let progress_repository = Arc::new(ProgressRepository::new(db));
    let auth_service = Arc::new(AuthService::new(user_repository.clone()));

    let (session_manager, completions) =
        SessionManager::new(catalog.clone(), Arc::new(ExerciseLibrary::builtin()));
    let session_manager = Arc::new(session_manager);

    tokio::spawn(run_progress_recorder(
        completions,
        progress_repository.clone(),
        catalog,
    ));

    let routes = create_routes(
        session_manager.clone(),
        auth_service,
        user_repository,
        progress_repository,
    );

    // Start cleanup task
    let cleanup_session_manager = session_manager.clone();
    let session_timeout = Duration::from_secs(config.session_timeout_minutes * 60);
    let cleanup_interval = Duration::from_secs(config.cleanup_interval_seconds.max(1));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(cleanup_interval);
        loop {
            interval.tick().await;
            let removed = cleanup_session_manager
                .cleanup_abandoned_sessions(session_timeout)
                .await;
            if removed > 0 {
                info!("Cleaned up {} abandoned sessions", removed);
            }
        }
    });

    info!("Server starting on {}:{}", config.host, config.port);

    let ip = match config.host.parse::<std::net::IpAddr>() {
        Ok(ip) => ip,
        Err(e) => {
            tracing::error!("Invalid HOST '{}': {}", config.host, e);
            std::process::exit(1);
        }
    };

    let (addr, server) =
        warp::serve(routes).bind_with_graceful_shutdown((ip, config.port), shutdown_signal());

    info!(
        "Server started successfully on {}. Press Ctrl+C to stop.",
        addr
    );
    server.await;
    info!("Server shutdown complete.");
}

fn load_catalog(path: Option<&str>) -> anyhow::Result<GameCatalog> {
    let Some(path) = path else {
        return Ok(GameCatalog::builtin());
    };

    info!("Loading game catalog from {}", path);
    let json = std::fs::read_to_string(path)?;
    Ok(GameCatalog::from_json(&json)?)
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let sigint = signal::unix::signal(signal::unix::SignalKind::interrupt());
        let sigterm = signal::unix::signal(signal::unix::SignalKind::terminate());

        match (sigint, sigterm) {
            (Ok(mut sigint), Ok(mut sigterm)) => {
                tokio::select! {
                    _ = sigint.recv() => {
                        info!("Received SIGINT, shutting down gracefully...");
                    }
                    _ = sigterm.recv() => {
                        info!("Received SIGTERM, shutting down gracefully...");
                    }
                }
                return;
            }
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!("Failed to install signal handlers: {}", e);
            }
        }
    }

    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("Failed to listen for ctrl+c: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received Ctrl+C, shutting down gracefully...");
}
