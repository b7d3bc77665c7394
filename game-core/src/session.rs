use game_types::{CompletionEvent, GameId, SessionStatus, WidgetInput, WidgetView};

use crate::widgets::{GameWidget, Widget};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Completed,
}

impl From<SessionState> for SessionStatus {
    fn from(state: SessionState) -> Self {
        match state {
            SessionState::Active => SessionStatus::Active,
            SessionState::Completed => SessionStatus::Completed,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputOutcome {
    pub applied: bool,
    pub completion: Option<CompletionEvent>,
}

/// One mounted play-through of a single game.
///
/// The session is bound to its game id for its whole life. Once it has
/// produced a [`CompletionEvent`] it is terminal and ignores further input.
#[derive(Debug, Clone)]
pub struct GameSession {
    game_id: GameId,
    points: i32,
    widget: GameWidget,
    state: SessionState,
}

impl GameSession {
    pub fn new(game_id: impl Into<GameId>, points: i32, widget: GameWidget) -> Self {
        Self {
            game_id: game_id.into(),
            points,
            widget,
            state: SessionState::Active,
        }
    }

    pub fn handle(&mut self, input: &WidgetInput) -> InputOutcome {
        if self.state == SessionState::Completed {
            return InputOutcome::default();
        }

        if *input == WidgetInput::Finish {
            let completion = self.complete();
            return InputOutcome {
                applied: completion.is_some(),
                completion,
            };
        }

        let applied = self.widget.apply(input);
        let completion = if applied && self.widget.completes_on_solve() {
            self.complete()
        } else {
            None
        };

        InputOutcome {
            applied,
            completion,
        }
    }

    /// Transition Active -> Completed if the widget is solved.
    fn complete(&mut self) -> Option<CompletionEvent> {
        if self.state != SessionState::Active {
            return None;
        }
        let outcome = self.widget.outcome()?;

        self.state = SessionState::Completed;
        Some(CompletionEvent {
            game_id: self.game_id.clone(),
            points: self.points,
            score_percent: outcome.score_percent(),
        })
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    pub fn points(&self) -> i32 {
        self.points
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_solved(&self) -> bool {
        self.widget.is_solved()
    }

    pub fn widget(&self) -> &GameWidget {
        &self.widget
    }

    pub fn view(&self) -> WidgetView {
        self.widget.view()
    }
}
