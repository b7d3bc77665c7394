use std::collections::HashMap;

use game_types::{Difficulty, GameCategory, GameDefinition};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Duplicate game id in catalog: {0}")]
    DuplicateId(String),
    #[error("Game '{id}' has invalid point value {points}")]
    InvalidPoints { id: String, points: i32 },
    #[error("Invalid catalog definition: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Ordered, immutable registry of the games offered on the platform.
#[derive(Debug, Clone)]
pub struct GameCatalog {
    games: Vec<GameDefinition>,
    index: HashMap<String, usize>,
}

impl GameCatalog {
    /// Build a catalog, rejecting duplicate identifiers and non-positive point values.
    pub fn new(games: Vec<GameDefinition>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(games.len());

        for (position, game) in games.iter().enumerate() {
            if game.points <= 0 {
                return Err(CatalogError::InvalidPoints {
                    id: game.id.clone(),
                    points: game.points,
                });
            }
            if index.insert(game.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateId(game.id.clone()));
            }
        }

        Ok(Self { games, index })
    }

    /// Load a catalog from a JSON array of game definitions
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let games: Vec<GameDefinition> = serde_json::from_str(json)?;
        Self::new(games)
    }

    /// The games shipped with the platform
    pub fn builtin() -> Self {
        let games = vec![
            definition(
                "waste-sorting",
                "Waste Sorting",
                GameCategory::Recycling,
                "Drag each piece of rubbish into the right bin.",
                Difficulty::Easy,
                50,
                Some("🗑️"),
            ),
            definition(
                "fix-the-habits",
                "Fix the Habits",
                GameCategory::Habits,
                "Spot the wasteful habits around the house and fix them.",
                Difficulty::Easy,
                40,
                Some("💡"),
            ),
            definition(
                "climate-quiz",
                "Climate Quiz",
                GameCategory::Climate,
                "Test what you know about the climate.",
                Difficulty::Medium,
                60,
                Some("🌍"),
            ),
            definition(
                "food-chain",
                "Food Chain",
                GameCategory::Wildlife,
                "Put the animals of the food chain in order.",
                Difficulty::Medium,
                70,
                Some("🦅"),
            ),
            definition(
                "plant-a-tree",
                "Plant a Tree",
                GameCategory::Climate,
                "Follow the steps to plant a tree.",
                Difficulty::Easy,
                30,
                Some("🌳"),
            ),
            definition(
                "spot-the-recyclables",
                "Spot the Recyclables",
                GameCategory::Fun,
                "Pick every item that can be recycled.",
                Difficulty::Hard,
                80,
                Some("♻️"),
            ),
            definition(
                "ocean-cleanup",
                "Ocean Cleanup",
                GameCategory::Wildlife,
                "Clear the plastic out of the sea. Coming soon.",
                Difficulty::Hard,
                100,
                Some("🌊"),
            ),
        ];

        // The builtin list is fixed, so validation cannot fail.
        let index = games
            .iter()
            .enumerate()
            .map(|(position, game)| (game.id.clone(), position))
            .collect();
        Self { games, index }
    }

    pub fn lookup(&self, id: &str) -> Option<&GameDefinition> {
        self.index.get(id).map(|&position| &self.games[position])
    }

    pub fn list(&self) -> &[GameDefinition] {
        &self.games
    }

    pub fn by_category(&self, category: GameCategory) -> Vec<&GameDefinition> {
        self.games
            .iter()
            .filter(|game| game.category == category)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

impl Default for GameCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn definition(
    id: &str,
    name: &str,
    category: GameCategory,
    description: &str,
    difficulty: Difficulty,
    points: i32,
    icon: Option<&str>,
) -> GameDefinition {
    GameDefinition {
        id: id.to_string(),
        name: name.to_string(),
        category,
        description: description.to_string(),
        difficulty,
        points,
        icon: icon.map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: &str, points: i32) -> GameDefinition {
        definition(id, id, GameCategory::Fun, "", Difficulty::Easy, points, None)
    }

    #[test]
    fn test_builtin_ids_are_unique() {
        let builtin = GameCatalog::builtin();
        let revalidated = GameCatalog::new(builtin.list().to_vec());
        assert!(revalidated.is_ok());
        assert_eq!(revalidated.unwrap().len(), builtin.len());
    }

    #[test]
    fn test_lookup_every_configured_id() {
        let catalog = GameCatalog::builtin();
        for game in catalog.list() {
            assert_eq!(catalog.lookup(&game.id), Some(game));
        }
        assert_eq!(catalog.lookup("does-not-exist"), None);
        assert_eq!(catalog.lookup(""), None);
        assert_eq!(catalog.lookup("WASTE-SORTING"), None);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = GameCatalog::new(vec![sample("a", 10), sample("b", 10), sample("a", 20)]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id == "a"));
    }

    #[test]
    fn test_non_positive_points_rejected() {
        let result = GameCatalog::new(vec![sample("a", 0)]);
        assert!(matches!(result, Err(CatalogError::InvalidPoints { points: 0, .. })));
    }

    #[test]
    fn test_order_preserved() {
        let catalog =
            GameCatalog::new(vec![sample("c", 1), sample("a", 2), sample("b", 3)]).unwrap();
        let ids: Vec<&str> = catalog.list().iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_by_category() {
        let catalog = GameCatalog::builtin();
        let climate = catalog.by_category(GameCategory::Climate);
        assert_eq!(climate.len(), 2);
        assert!(climate.iter().all(|g| g.category == GameCategory::Climate));
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"id": "x", "name": "X", "category": "recycling", "description": "",
             "difficulty": "hard", "points": 5},
            {"id": "x", "name": "X2", "category": "fun", "description": "",
             "difficulty": "easy", "points": 5}
        ]"#;
        assert!(matches!(
            GameCatalog::from_json(json),
            Err(CatalogError::DuplicateId(_))
        ));
        assert!(matches!(
            GameCatalog::from_json("not json"),
            Err(CatalogError::Parse(_))
        ));
    }
}
