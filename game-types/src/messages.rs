use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::{CompletionEvent, GameId};

pub type SessionId = Uuid;

/// A single user interaction with a mounted widget.
///
/// Inputs that do not apply to the mounted widget are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "camelCase")]
#[ts(export)]
pub enum WidgetInput {
    Drop { item: String, bin: String },
    Toggle { hazard: String },
    SelectOption { option: usize },
    NextQuestion,
    Swap { index: usize },
    Advance,
    ToggleTile { index: usize },
    Finish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum SessionStatus {
    Active,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SortItemView {
    pub id: String,
    pub label: String,
    pub assigned_bin: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct HazardView {
    pub id: String,
    pub label: String,
    pub fixed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TileView {
    pub label: String,
    pub selected: bool,
}

/// Client-facing snapshot of a widget. Never exposes the correct answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "camelCase")]
#[ts(export)]
pub enum WidgetView {
    Segregation {
        bins: Vec<String>,
        items: Vec<SortItemView>,
    },
    HabitFix {
        hazards: Vec<HazardView>,
    },
    #[serde(rename_all = "camelCase")]
    Quiz {
        question_index: usize,
        total_questions: usize,
        score: usize,
        prompt: Option<String>,
        options: Vec<String>,
        locked_answer: Option<usize>,
    },
    Reorder {
        tokens: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    Stepper {
        step_index: usize,
        total_steps: usize,
        current_step: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    GridPicker {
        tiles: Vec<TileView>,
        target_count: usize,
    },
    #[serde(rename_all = "camelCase")]
    NotImplemented {
        game_id: GameId,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SessionView {
    pub session_id: SessionId,
    pub game_id: GameId,
    pub points: i32,
    pub status: SessionStatus,
    pub solved: bool,
    pub widget: WidgetView,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OpenSessionRequest {
    #[serde(default)]
    pub game_id: Option<GameId>,
    #[serde(default)]
    pub points: Option<i32>,
}

/// Result of one input. `session` is `None` once the host has closed.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InputResponse {
    pub applied: bool,
    pub session: Option<SessionView>,
    pub completion: Option<CompletionEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CompleteGameRequest {
    pub game_id: GameId,
    #[serde(default)]
    pub points: Option<i32>,
    #[serde(default)]
    pub score_percent: Option<u8>,
}
