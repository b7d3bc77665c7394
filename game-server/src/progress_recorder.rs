use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::session_manager::CompletedGame;
use game_core::GameCatalog;
use game_persistence::repositories::ProgressRepository;

/// Persist one completion. Games missing from the catalog are skipped.
pub async fn record_completed_game(
    completed: &CompletedGame,
    progress: &ProgressRepository,
    catalog: &GameCatalog,
) -> anyhow::Result<bool> {
    let Some(game) = catalog.lookup(&completed.event.game_id) else {
        warn!(
            "Ignoring completion of unknown game '{}' by {}",
            completed.event.game_id, completed.username
        );
        return Ok(false);
    };

    progress
        .record_completion(&completed.username, &completed.event, game.category)
        .await?;
    Ok(true)
}

/// Drain the session completion channel into the progress store until every
/// sender is dropped.
pub async fn run_progress_recorder(
    mut receiver: mpsc::Receiver<CompletedGame>,
    progress: Arc<ProgressRepository>,
    catalog: Arc<GameCatalog>,
) {
    while let Some(completed) = receiver.recv().await {
        match record_completed_game(&completed, &progress, &catalog).await {
            Ok(true) => info!(
                "Recorded '{}' for {} ({} points)",
                completed.event.game_id, completed.username, completed.event.points
            ),
            Ok(false) => {}
            Err(err) => error!(
                "Failed to record completion of '{}' for {}: {}",
                completed.event.game_id, completed.username, err
            ),
        }
    }
    info!("Progress recorder stopped");
}
