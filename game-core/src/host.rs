use std::sync::Arc;

use game_types::{WidgetInput, WidgetView};
use tracing::debug;

use crate::catalog::GameCatalog;
use crate::exercises::ExerciseLibrary;
use crate::game_events::CompletionSink;
use crate::session::{GameSession, InputOutcome};
use crate::widgets::GameWidget;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Open,
    Closed,
}

/// Mounts the widget for a game id and forwards its completion exactly once.
///
/// The host never persists anything itself; the sink decides what happens
/// with a completion.
pub struct GameHost<S: CompletionSink> {
    catalog: Arc<GameCatalog>,
    exercises: Arc<ExerciseLibrary>,
    sink: S,
    session: Option<GameSession>,
}

impl<S: CompletionSink> GameHost<S> {
    pub fn new(catalog: Arc<GameCatalog>, exercises: Arc<ExerciseLibrary>, sink: S) -> Self {
        Self {
            catalog,
            exercises,
            sink,
            session: None,
        }
    }

    /// Open the host for `game_id`. `points` defaults to the catalog value.
    ///
    /// A missing id leaves the host closed. Unknown ids and games without an
    /// exercise mount the placeholder widget.
    pub fn open(&mut self, game_id: Option<&str>, points: Option<i32>) -> Visibility {
        let Some(game_id) = game_id else {
            self.session = None;
            return Visibility::Closed;
        };

        let configured = self.catalog.lookup(game_id).map(|game| game.points);
        let points = points.or(configured).unwrap_or(0);

        let widget = if configured.is_some() {
            self.exercises.mount(game_id)
        } else {
            GameWidget::not_implemented(game_id)
        };

        if widget.is_placeholder() {
            debug!("No exercise for game '{}', mounting placeholder", game_id);
        } else {
            debug!("Mounted game '{}' worth {} points", game_id, points);
        }

        self.session = Some(GameSession::new(game_id, points, widget));
        Visibility::Open
    }

    pub fn handle(&mut self, input: &WidgetInput) -> InputOutcome {
        let Some(session) = self.session.as_mut() else {
            return InputOutcome::default();
        };

        let outcome = session.handle(input);
        if let Some(event) = &outcome.completion {
            debug!(
                "Game '{}' completed for {} points",
                event.game_id, event.points
            );
            self.sink.on_completed(event.clone());
            self.session = None;
        }
        outcome
    }

    /// Close without emitting a completion
    pub fn close(&mut self) {
        self.session = None;
    }

    pub fn visibility(&self) -> Visibility {
        if self.session.is_some() {
            Visibility::Open
        } else {
            Visibility::Closed
        }
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn view(&self) -> Option<WidgetView> {
        self.session.as_ref().map(GameSession::view)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
