use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub type GameId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum GameCategory {
    Recycling,
    Climate,
    Habits,
    Wildlife,
    Fun,
}

impl GameCategory {
    pub const ALL: [GameCategory; 5] = [
        GameCategory::Recycling,
        GameCategory::Climate,
        GameCategory::Habits,
        GameCategory::Wildlife,
        GameCategory::Fun,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameCategory::Recycling => "recycling",
            GameCategory::Climate => "climate",
            GameCategory::Habits => "habits",
            GameCategory::Wildlife => "wildlife",
            GameCategory::Fun => "fun",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Catalog entry describing one mini-game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GameDefinition {
    pub id: GameId,
    pub name: String,
    pub category: GameCategory,
    pub description: String,
    pub difficulty: Difficulty,
    pub points: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Emitted exactly once when a session is solved.
///
/// `points` is always the configured point value for the game. Quizzes also
/// carry the graded score; combining it with the points is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CompletionEvent {
    pub game_id: GameId,
    pub points: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_percent: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum Badge {
    FirstGame,
    Points100,
    Points500,
    QuizWhiz,
    AllRounder,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProgressSummary {
    pub total_points: i32,
    pub games_completed: i32,
    pub monthly_completions: i32,
    pub badges: Vec<Badge>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!(GameCategory::parse("Recycling"), Some(GameCategory::Recycling));
        assert_eq!(GameCategory::parse(" fun "), Some(GameCategory::Fun));
        assert_eq!(GameCategory::parse("space"), None);
    }

    #[test]
    fn test_completion_event_wire_shape() {
        let event = CompletionEvent {
            game_id: "waste-sorting".to_string(),
            points: 50,
            score_percent: None,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json, serde_json::json!({ "gameId": "waste-sorting", "points": 50 }));

        let quiz = CompletionEvent {
            game_id: "climate-quiz".to_string(),
            points: 40,
            score_percent: Some(75),
        };
        let json = serde_json::to_value(&quiz).unwrap();
        assert_eq!(json["scorePercent"], 75);
    }

    #[test]
    fn test_definition_icon_optional() {
        let json = r#"{
            "id": "a",
            "name": "A",
            "category": "habits",
            "description": "",
            "difficulty": "easy",
            "points": 10
        }"#;
        let definition: GameDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(definition.category, GameCategory::Habits);
        assert_eq!(definition.icon, None);
    }
}
