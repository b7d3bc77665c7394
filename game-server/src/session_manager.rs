use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{RwLock, mpsc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::UserContext;
use game_core::{CompletionSink, ExerciseLibrary, GameCatalog, GameHost, Visibility};
use game_types::{
    CompletionEvent, InputResponse, OpenSessionRequest, SessionId, SessionView, WidgetInput,
};

/// A completion tagged with the user who played the game
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedGame {
    pub username: String,
    pub event: CompletionEvent,
}

/// Forwards completions from a hosted session to the recorder task
pub struct CompletionForwarder {
    username: String,
    sender: mpsc::Sender<CompletedGame>,
}

impl CompletionSink for CompletionForwarder {
    fn on_completed(&mut self, event: CompletionEvent) {
        let completed = CompletedGame {
            username: self.username.clone(),
            event,
        };
        match self.sender.try_send(completed) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(completed)) => warn!(
                "Completion queue full, dropping '{}' for {}",
                completed.event.game_id, completed.username
            ),
            Err(mpsc::error::TrySendError::Closed(completed)) => warn!(
                "Completion recorder is gone, dropping '{}' for {}",
                completed.event.game_id, completed.username
            ),
        }
    }
}

/// Completions waiting for the recorder before new ones are dropped
pub const COMPLETION_QUEUE_CAPACITY: usize = 1024;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),
    #[error("Session {0} belongs to another user")]
    NotOwner(SessionId),
}

struct HostedSession {
    owner: String,
    host: GameHost<CompletionForwarder>,
    last_activity: Instant,
}

impl HostedSession {
    fn view(&self, session_id: SessionId) -> Option<SessionView> {
        let session = self.host.session()?;
        Some(SessionView {
            session_id,
            game_id: session.game_id().to_string(),
            points: session.points(),
            status: session.state().into(),
            solved: session.is_solved(),
            widget: session.view(),
        })
    }

    fn is_expired(&self, timeout: Duration) -> bool {
        self.last_activity.elapsed() > timeout
    }
}

/// Owns every open game host, one per session.
pub struct SessionManager {
    sessions: RwLock<HashMap<SessionId, HostedSession>>,
    catalog: Arc<GameCatalog>,
    exercises: Arc<ExerciseLibrary>,
    completions: mpsc::Sender<CompletedGame>,
}

impl SessionManager {
    /// Returns the manager and the receiving end of its completion channel
    pub fn new(
        catalog: Arc<GameCatalog>,
        exercises: Arc<ExerciseLibrary>,
    ) -> (Self, mpsc::Receiver<CompletedGame>) {
        Self::with_queue_capacity(catalog, exercises, COMPLETION_QUEUE_CAPACITY)
    }

    pub fn with_queue_capacity(
        catalog: Arc<GameCatalog>,
        exercises: Arc<ExerciseLibrary>,
        capacity: usize,
    ) -> (Self, mpsc::Receiver<CompletedGame>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let manager = Self {
            sessions: RwLock::new(HashMap::new()),
            catalog,
            exercises,
            completions: sender,
        };
        (manager, receiver)
    }

    pub fn catalog(&self) -> &Arc<GameCatalog> {
        &self.catalog
    }

    /// Open a host for the requested game. Returns `None` when no game id was
    /// given, in which case nothing is mounted.
    ///
    /// Sessions are always worth the catalog points; a client value is ignored.
    pub async fn open_session(
        &self,
        owner: &UserContext,
        request: OpenSessionRequest,
    ) -> Option<SessionView> {
        let configured = request
            .game_id
            .as_deref()
            .and_then(|game_id| self.catalog.lookup(game_id))
            .map(|game| game.points);
        if let Some(points) = request.points.filter(|points| Some(*points) != configured) {
            warn!(
                "{} requested {} points for '{}', using configured {:?}",
                owner.username,
                points,
                request.game_id.as_deref().unwrap_or_default(),
                configured
            );
        }

        let sink = CompletionForwarder {
            username: owner.username.clone(),
            sender: self.completions.clone(),
        };
        let mut host = GameHost::new(self.catalog.clone(), self.exercises.clone(), sink);

        if host.open(request.game_id.as_deref(), configured) == Visibility::Closed {
            return None;
        }

        let session_id = Uuid::new_v4();
        let hosted = HostedSession {
            owner: owner.username.clone(),
            host,
            last_activity: Instant::now(),
        };
        let view = hosted.view(session_id);

        self.sessions.write().await.insert(session_id, hosted);
        if let Some(view) = &view {
            info!(
                "Opened session {} of '{}' for {}",
                session_id, view.game_id, owner.username
            );
        }
        view
    }

    pub async fn get_session(&self, session_id: SessionId) -> Option<SessionView> {
        let sessions = self.sessions.read().await;
        sessions.get(&session_id)?.view(session_id)
    }

    /// Apply one input. A completed session is removed and reported with
    /// `session: None`.
    pub async fn handle_input(
        &self,
        session_id: SessionId,
        caller: &UserContext,
        input: &WidgetInput,
    ) -> Result<InputResponse, SessionError> {
        let mut sessions = self.sessions.write().await;
        let hosted = sessions
            .get_mut(&session_id)
            .ok_or(SessionError::NotFound(session_id))?;

        if hosted.owner != caller.username {
            return Err(SessionError::NotOwner(session_id));
        }

        hosted.last_activity = Instant::now();
        let outcome = hosted.host.handle(input);
        let session = hosted.view(session_id);

        if hosted.host.visibility() == Visibility::Closed {
            sessions.remove(&session_id);
            info!("Session {} completed", session_id);
        }

        Ok(InputResponse {
            applied: outcome.applied,
            session,
            completion: outcome.completion,
        })
    }

    /// Close a session without recording anything
    pub async fn close_session(
        &self,
        session_id: SessionId,
        caller: &UserContext,
    ) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().await;
        let hosted = sessions
            .get_mut(&session_id)
            .ok_or(SessionError::NotFound(session_id))?;

        if hosted.owner != caller.username {
            return Err(SessionError::NotOwner(session_id));
        }

        hosted.host.close();
        sessions.remove(&session_id);
        info!("Session {} closed by {}", session_id, caller.username);
        Ok(())
    }

    pub async fn cleanup_abandoned_sessions(&self, timeout: Duration) -> usize {
        let mut sessions_to_remove = Vec::new();

        {
            let sessions = self.sessions.read().await;
            for (session_id, hosted) in sessions.iter() {
                if hosted.is_expired(timeout) {
                    sessions_to_remove.push(*session_id);
                }
            }
        }

        if sessions_to_remove.is_empty() {
            return 0;
        }

        let mut sessions = self.sessions.write().await;
        let mut removed = 0;
        for session_id in sessions_to_remove {
            // Activity may have happened between the two locks
            if sessions
                .get(&session_id)
                .is_some_and(|hosted| hosted.is_expired(timeout))
            {
                sessions.remove(&session_id);
                removed += 1;
                info!("Removed abandoned session {}", session_id);
            }
        }
        removed
    }

    pub async fn get_active_sessions_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
