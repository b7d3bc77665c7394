
use std::time::Duration;

use game_core::{ExerciseLibrary, GameCatalog};
use game_persistence::connection::connect_to_memory_database;
use game_persistence::repositories::{NewUser, ProgressRepository, UserRepository};
use game_server::progress_recorder::{record_completed_game, run_progress_recorder};
use game_server::session_manager::{CompletedGame, SessionError, SessionManager};
use game_types::{
    CompletionEvent, OpenSessionRequest, SessionStatus, UserRole, WidgetInput, WidgetView,
};
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;
use test_helpers::{TestSessionSetup, create_test_user, open_request};
use uuid::Uuid;

#[tokio::test]
async fn test_open_session_uses_catalog_points() {
    let setup = TestSessionSetup::new();
    let alice = create_test_user("alice");

    let view = setup
        .session_manager
        .open_session(&alice, open_request("waste-sorting"))
        .await
        .unwrap();

    assert_eq!(view.game_id, "waste-sorting");
    assert_eq!(view.points, 50);
    assert_eq!(view.status, SessionStatus::Active);
    assert!(!view.solved);
    assert!(matches!(view.widget, WidgetView::Segregation { .. }));
    assert_eq!(setup.session_manager.get_active_sessions_count().await, 1);

    let fetched = setup
        .session_manager
        .get_session(view.session_id)
        .await
        .unwrap();
    assert_eq!(fetched, view);
}

#[tokio::test]
async fn test_client_points_are_replaced_by_catalog_points() {
    let mut setup = TestSessionSetup::new();
    let alice = create_test_user("alice");

    for points in [-5000, 0, i32::MAX] {
        let view = setup
            .session_manager
            .open_session(
                &alice,
                OpenSessionRequest {
                    game_id: Some("plant-a-tree".to_string()),
                    points: Some(points),
                },
            )
            .await
            .unwrap();
        assert_eq!(view.points, 30);

        for _ in 0..5 {
            setup
                .session_manager
                .handle_input(view.session_id, &alice, &WidgetInput::Advance)
                .await
                .unwrap();
        }
        assert_eq!(setup.completions.try_recv().unwrap().event.points, 30);
    }

    // Unknown games stay worth nothing whatever the client asks for
    let view = setup
        .session_manager
        .open_session(
            &alice,
            OpenSessionRequest {
                game_id: Some("moon-landing".to_string()),
                points: Some(1000),
            },
        )
        .await
        .unwrap();
    assert_eq!(view.points, 0);
}

#[tokio::test]
async fn test_full_completion_queue_drops_instead_of_growing() {
    let (session_manager, mut completions) = SessionManager::with_queue_capacity(
        Arc::new(GameCatalog::builtin()),
        Arc::new(ExerciseLibrary::builtin()),
        1,
    );
    let alice = create_test_user("alice");

    for _ in 0..2 {
        let view = session_manager
            .open_session(&alice, open_request("plant-a-tree"))
            .await
            .unwrap();
        let mut completion = None;
        for _ in 0..5 {
            let response = session_manager
                .handle_input(view.session_id, &alice, &WidgetInput::Advance)
                .await
                .unwrap();
            completion = completion.or(response.completion);
        }
        // The player still sees the completion even when recording is dropped
        assert!(completion.is_some());
    }

    assert!(completions.try_recv().is_ok());
    assert!(completions.try_recv().is_err());
}

#[tokio::test]
async fn test_open_without_game_id_mounts_nothing() {
    let setup = TestSessionSetup::new();
    let alice = create_test_user("alice");

    let view = setup
        .session_manager
        .open_session(&alice, OpenSessionRequest::default())
        .await;

    assert!(view.is_none());
    assert_eq!(setup.session_manager.get_active_sessions_count().await, 0);
}

#[tokio::test]
async fn test_completion_is_forwarded_once() {
    let mut setup = TestSessionSetup::new();
    let alice = create_test_user("alice");

    let view = setup
        .session_manager
        .open_session(&alice, open_request("plant-a-tree"))
        .await
        .unwrap();

    let mut completions = Vec::new();
    for _ in 0..5 {
        let response = setup
            .session_manager
            .handle_input(view.session_id, &alice, &WidgetInput::Advance)
            .await
            .unwrap();
        completions.extend(response.completion);
    }

    assert_eq!(completions.len(), 1);
    assert_eq!(setup.session_manager.get_active_sessions_count().await, 0);

    // The closed session no longer accepts input
    let result = setup
        .session_manager
        .handle_input(view.session_id, &alice, &WidgetInput::Finish)
        .await;
    assert_eq!(result.unwrap_err(), SessionError::NotFound(view.session_id));

    let forwarded = setup.completions.try_recv().unwrap();
    assert_eq!(
        forwarded,
        CompletedGame {
            username: "alice".to_string(),
            event: CompletionEvent {
                game_id: "plant-a-tree".to_string(),
                points: 30,
                score_percent: None,
            },
        }
    );
    assert!(setup.completions.try_recv().is_err());
}

#[tokio::test]
async fn test_unsolved_finish_does_not_complete() {
    let mut setup = TestSessionSetup::new();
    let alice = create_test_user("alice");

    let view = setup
        .session_manager
        .open_session(&alice, open_request("fix-the-habits"))
        .await
        .unwrap();

    let response = setup
        .session_manager
        .handle_input(view.session_id, &alice, &WidgetInput::Finish)
        .await
        .unwrap();

    assert!(response.completion.is_none());
    assert_eq!(response.session.unwrap().status, SessionStatus::Active);
    assert!(setup.completions.try_recv().is_err());
}

#[tokio::test]
async fn test_sessions_are_owned() {
    let setup = TestSessionSetup::new();
    let alice = create_test_user("alice");
    let bob = create_test_user("bob");

    let view = setup
        .session_manager
        .open_session(&alice, open_request("climate-quiz"))
        .await
        .unwrap();

    let result = setup
        .session_manager
        .handle_input(
            view.session_id,
            &bob,
            &WidgetInput::SelectOption { option: 1 },
        )
        .await;
    assert_eq!(result.unwrap_err(), SessionError::NotOwner(view.session_id));

    let result = setup.session_manager.close_session(view.session_id, &bob).await;
    assert_eq!(result.unwrap_err(), SessionError::NotOwner(view.session_id));

    setup
        .session_manager
        .close_session(view.session_id, &alice)
        .await
        .unwrap();
    assert!(setup.session_manager.get_session(view.session_id).await.is_none());
}

#[tokio::test]
async fn test_unknown_session() {
    let setup = TestSessionSetup::new();
    let alice = create_test_user("alice");
    let missing = Uuid::new_v4();

    assert!(setup.session_manager.get_session(missing).await.is_none());
    let result = setup
        .session_manager
        .handle_input(missing, &alice, &WidgetInput::Finish)
        .await;
    assert_eq!(result.unwrap_err(), SessionError::NotFound(missing));
}

#[tokio::test]
async fn test_cleanup_abandoned_sessions() {
    let setup = TestSessionSetup::new();
    let alice = create_test_user("alice");

    setup
        .session_manager
        .open_session(&alice, open_request("waste-sorting"))
        .await
        .unwrap();
    setup
        .session_manager
        .open_session(&alice, open_request("food-chain"))
        .await
        .unwrap();

    let removed = setup
        .session_manager
        .cleanup_abandoned_sessions(Duration::from_secs(60))
        .await;
    assert_eq!(removed, 0);

    tokio::time::sleep(Duration::from_millis(20)).await;
    let removed = setup
        .session_manager
        .cleanup_abandoned_sessions(Duration::from_millis(10))
        .await;
    assert_eq!(removed, 2);
    assert_eq!(setup.session_manager.get_active_sessions_count().await, 0);
}

async fn create_progress_repository() -> Arc<ProgressRepository> {
    let db = connect_to_memory_database().await.unwrap();
    Migrator::up(&db, None).await.unwrap();

    UserRepository::new(db.clone())
        .create_user(NewUser {
            username: "alice".to_string(),
            password: "pw".to_string(),
            display_name: "Alice".to_string(),
            role: UserRole::Student,
        })
        .await
        .unwrap();

    Arc::new(ProgressRepository::new(db))
}

#[tokio::test]
async fn test_record_completed_game_skips_unknown_games() {
    let progress = create_progress_repository().await;
    let catalog = GameCatalog::builtin();

    let unknown = CompletedGame {
        username: "alice".to_string(),
        event: CompletionEvent {
            game_id: "moon-landing".to_string(),
            points: 10,
            score_percent: None,
        },
    };
    assert!(!record_completed_game(&unknown, &progress, &catalog).await.unwrap());

    let known = CompletedGame {
        username: "alice".to_string(),
        event: CompletionEvent {
            game_id: "food-chain".to_string(),
            points: 70,
            score_percent: None,
        },
    };
    assert!(record_completed_game(&known, &progress, &catalog).await.unwrap());

    let summary = progress.summary("alice", chrono::Utc::now()).await.unwrap();
    assert_eq!(summary.total_points, 70);
    assert_eq!(summary.games_completed, 1);
}

#[tokio::test]
async fn test_recorder_drains_session_completions() {
    let setup = TestSessionSetup::new();
    let progress = create_progress_repository().await;
    let alice = create_test_user("alice");

    let session_manager = setup.session_manager.clone();
    let recorder = tokio::spawn(run_progress_recorder(
        setup.completions,
        progress.clone(),
        Arc::new(GameCatalog::builtin()),
    ));

    let view = session_manager
        .open_session(&alice, open_request("plant-a-tree"))
        .await
        .unwrap();
    for _ in 0..5 {
        session_manager
            .handle_input(view.session_id, &alice, &WidgetInput::Advance)
            .await
            .unwrap();
    }

    // Dropping the last sender stops the recorder once the queue is drained
    drop(setup.session_manager);
    drop(session_manager);
    recorder.await.unwrap();

    let summary = progress.summary("alice", chrono::Utc::now()).await.unwrap();
    assert_eq!(summary.total_points, 30);
    assert_eq!(summary.games_completed, 1);
}
