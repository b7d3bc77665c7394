//! The mini-game widget family.
//!
//! Every widget owns its own interaction state, exposes a solved predicate and
//! reports an outcome once solved. Widgets never decide how many points a
//! completion is worth.

pub mod grid_picker;
pub mod habit_fix;
pub mod quiz;
pub mod reorder;
pub mod segregation;
pub mod stepper;

use game_types::{GameId, WidgetInput, WidgetView};
use serde::{Deserialize, Serialize};

pub use grid_picker::{GridPickerGame, GridPickerSpec, Tile};
pub use habit_fix::{HabitFixGame, HabitFixSpec, Hazard};
pub use quiz::{QuizGame, QuizQuestion, QuizSpec};
pub use reorder::{ReorderGame, ReorderSpec};
pub use segregation::{SegregationGame, SegregationSpec, SortItem};
pub use stepper::{StepperGame, StepperSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetOutcome {
    Solved,
    Scored { score_percent: u8 },
}

impl WidgetOutcome {
    pub fn score_percent(&self) -> Option<u8> {
        match self {
            WidgetOutcome::Solved => None,
            WidgetOutcome::Scored { score_percent } => Some(*score_percent),
        }
    }
}

/// Common contract shared by all exercises
pub trait Widget {
    /// Apply one input, returning whether the widget state changed.
    /// Inputs the widget does not understand are ignored.
    fn apply(&mut self, input: &WidgetInput) -> bool;

    fn is_solved(&self) -> bool;

    fn outcome(&self) -> Option<WidgetOutcome> {
        self.is_solved().then_some(WidgetOutcome::Solved)
    }

    /// Whether reaching the solved state completes the session without an
    /// explicit finish action.
    fn completes_on_solve(&self) -> bool {
        false
    }

    fn view(&self) -> WidgetView;
}

/// Typed configuration for each widget kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum WidgetSpec {
    Segregation(SegregationSpec),
    HabitFix(HabitFixSpec),
    Quiz(QuizSpec),
    Reorder(ReorderSpec),
    Stepper(StepperSpec),
    GridPicker(GridPickerSpec),
}

impl WidgetSpec {
    pub fn build(self) -> GameWidget {
        match self {
            WidgetSpec::Segregation(spec) => GameWidget::Segregation(SegregationGame::new(spec)),
            WidgetSpec::HabitFix(spec) => GameWidget::HabitFix(HabitFixGame::new(spec)),
            WidgetSpec::Quiz(spec) => GameWidget::Quiz(QuizGame::new(spec)),
            WidgetSpec::Reorder(spec) => GameWidget::Reorder(ReorderGame::new(spec)),
            WidgetSpec::Stepper(spec) => GameWidget::Stepper(StepperGame::new(spec)),
            WidgetSpec::GridPicker(spec) => GameWidget::GridPicker(GridPickerGame::new(spec)),
        }
    }
}

/// A mounted widget, or the placeholder shown for games without an exercise.
#[derive(Debug, Clone)]
pub enum GameWidget {
    Segregation(SegregationGame),
    HabitFix(HabitFixGame),
    Quiz(QuizGame),
    Reorder(ReorderGame),
    Stepper(StepperGame),
    GridPicker(GridPickerGame),
    NotImplemented { game_id: GameId },
}

impl GameWidget {
    pub fn not_implemented(game_id: impl Into<GameId>) -> Self {
        GameWidget::NotImplemented {
            game_id: game_id.into(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, GameWidget::NotImplemented { .. })
    }

    fn as_widget(&self) -> Option<&dyn Widget> {
        match self {
            GameWidget::Segregation(game) => Some(game),
            GameWidget::HabitFix(game) => Some(game),
            GameWidget::Quiz(game) => Some(game),
            GameWidget::Reorder(game) => Some(game),
            GameWidget::Stepper(game) => Some(game),
            GameWidget::GridPicker(game) => Some(game),
            GameWidget::NotImplemented { .. } => None,
        }
    }

    fn as_widget_mut(&mut self) -> Option<&mut dyn Widget> {
        match self {
            GameWidget::Segregation(game) => Some(game),
            GameWidget::HabitFix(game) => Some(game),
            GameWidget::Quiz(game) => Some(game),
            GameWidget::Reorder(game) => Some(game),
            GameWidget::Stepper(game) => Some(game),
            GameWidget::GridPicker(game) => Some(game),
            GameWidget::NotImplemented { .. } => None,
        }
    }
}

impl Widget for GameWidget {
    fn apply(&mut self, input: &WidgetInput) -> bool {
        self.as_widget_mut()
            .is_some_and(|widget| widget.apply(input))
    }

    fn is_solved(&self) -> bool {
        self.as_widget().is_some_and(|widget| widget.is_solved())
    }

    fn outcome(&self) -> Option<WidgetOutcome> {
        self.as_widget().and_then(|widget| widget.outcome())
    }

    fn completes_on_solve(&self) -> bool {
        self.as_widget()
            .is_some_and(|widget| widget.completes_on_solve())
    }

    fn view(&self) -> WidgetView {
        match self {
            GameWidget::Segregation(game) => game.view(),
            GameWidget::HabitFix(game) => game.view(),
            GameWidget::Quiz(game) => game.view(),
            GameWidget::Reorder(game) => game.view(),
            GameWidget::Stepper(game) => game.view(),
            GameWidget::GridPicker(game) => game.view(),
            GameWidget::NotImplemented { game_id } => WidgetView::NotImplemented {
                game_id: game_id.clone(),
            },
        }
    }
}
