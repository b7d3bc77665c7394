use std::collections::HashSet;

use game_types::{Badge, GameCategory};

const POINTS_100: i32 = 100;
const POINTS_500: i32 = 500;

/// Accumulates completions and derives the milestone badges a player holds.
#[derive(Debug, Clone, Default)]
pub struct BadgeTracker {
    completions: usize,
    total_points: i32,
    perfect_quiz: bool,
    categories: HashSet<GameCategory>,
}

impl BadgeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, category: Option<GameCategory>, points: i32, score_percent: Option<u8>) {
        self.completions += 1;
        self.total_points += points;
        if score_percent == Some(100) {
            self.perfect_quiz = true;
        }
        if let Some(category) = category {
            self.categories.insert(category);
        }
    }

    pub fn badges(&self) -> Vec<Badge> {
        let mut badges = Vec::new();
        if self.completions > 0 {
            badges.push(Badge::FirstGame);
        }
        if self.total_points >= POINTS_100 {
            badges.push(Badge::Points100);
        }
        if self.total_points >= POINTS_500 {
            badges.push(Badge::Points500);
        }
        if self.perfect_quiz {
            badges.push(Badge::QuizWhiz);
        }
        if GameCategory::ALL
            .iter()
            .all(|category| self.categories.contains(category))
        {
            badges.push(Badge::AllRounder);
        }
        badges
    }
}
