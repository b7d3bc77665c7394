use std::collections::HashMap;

use game_types::{SortItemView, WidgetInput, WidgetView};
use serde::{Deserialize, Serialize};

use super::Widget;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortItem {
    pub id: String,
    pub label: String,
    pub correct_bin: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegregationSpec {
    pub bins: Vec<String>,
    pub items: Vec<SortItem>,
}

/// Drag-and-drop sorting of items into bins.
#[derive(Debug, Clone)]
pub struct SegregationGame {
    spec: SegregationSpec,
    assignments: HashMap<String, String>,
}

impl SegregationGame {
    pub fn new(spec: SegregationSpec) -> Self {
        Self {
            spec,
            assignments: HashMap::new(),
        }
    }

    /// Assign `item` to `bin`. Unknown items or bins are ignored.
    pub fn drop_item(&mut self, item: &str, bin: &str) -> bool {
        let known_item = self.spec.items.iter().any(|i| i.id == item);
        let known_bin = self.spec.bins.iter().any(|b| b == bin);
        if !known_item || !known_bin {
            return false;
        }

        match self.assignments.get(item) {
            Some(current) if current == bin => false,
            _ => {
                self.assignments.insert(item.to_string(), bin.to_string());
                true
            }
        }
    }

    pub fn assigned_bin(&self, item: &str) -> Option<&str> {
        self.assignments.get(item).map(String::as_str)
    }

    pub fn placed_count(&self) -> usize {
        self.assignments.len()
    }
}

impl Widget for SegregationGame {
    fn apply(&mut self, input: &WidgetInput) -> bool {
        match input {
            WidgetInput::Drop { item, bin } => self.drop_item(item, bin),
            _ => false,
        }
    }

    fn is_solved(&self) -> bool {
        self.spec
            .items
            .iter()
            .all(|item| self.assigned_bin(&item.id) == Some(item.correct_bin.as_str()))
    }

    fn view(&self) -> WidgetView {
        WidgetView::Segregation {
            bins: self.spec.bins.clone(),
            items: self
                .spec
                .items
                .iter()
                .map(|item| SortItemView {
                    id: item.id.clone(),
                    label: item.label.clone(),
                    assigned_bin: self.assignments.get(&item.id).cloned(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_game() -> SegregationGame {
        let item = |id: &str, bin: &str| SortItem {
            id: id.to_string(),
            label: id.to_string(),
            correct_bin: bin.to_string(),
        };
        SegregationGame::new(SegregationSpec {
            bins: vec![
                "organic".to_string(),
                "recyclable".to_string(),
                "non".to_string(),
            ],
            items: vec![
                item("banana", "organic"),
                item("bottle", "recyclable"),
                item("paper", "recyclable"),
                item("chip", "non"),
            ],
        })
    }

    #[test]
    fn test_all_correct_is_solved() {
        let mut game = create_test_game();
        assert!(game.drop_item("banana", "organic"));
        assert!(game.drop_item("bottle", "recyclable"));
        assert!(game.drop_item("paper", "recyclable"));
        assert!(!game.is_solved());
        assert!(game.drop_item("chip", "non"));
        assert!(game.is_solved());
    }

    #[test]
    fn test_one_wrong_bin_is_not_solved() {
        let mut game = create_test_game();
        game.drop_item("banana", "organic");
        game.drop_item("bottle", "recyclable");
        game.drop_item("paper", "recyclable");
        game.drop_item("chip", "recyclable");
        assert_eq!(game.placed_count(), 4);
        assert!(!game.is_solved());

        // Moving it to the right bin fixes the board
        assert!(game.drop_item("chip", "non"));
        assert!(game.is_solved());
    }

    #[test]
    fn test_unknown_payloads_ignored() {
        let mut game = create_test_game();
        assert!(!game.drop_item("sandwich", "organic"));
        assert!(!game.drop_item("banana", "compost"));
        assert_eq!(game.placed_count(), 0);

        assert!(game.drop_item("banana", "organic"));
        assert!(!game.drop_item("banana", "organic"));
    }

    #[test]
    fn test_view_hides_correct_bins() {
        let mut game = create_test_game();
        game.drop_item("banana", "non");
        match game.view() {
            WidgetView::Segregation { bins, items } => {
                assert_eq!(bins.len(), 3);
                assert_eq!(items[0].assigned_bin.as_deref(), Some("non"));
                assert_eq!(items[1].assigned_bin, None);
            }
            other => panic!("Expected segregation view, got {:?}", other),
        }
    }
}
