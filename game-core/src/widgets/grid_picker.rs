use std::collections::BTreeSet;

use game_types::{TileView, WidgetInput, WidgetView};
use serde::{Deserialize, Serialize};

use super::Widget;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub label: String,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridPickerSpec {
    pub tiles: Vec<Tile>,
    pub target_count: usize,
}

/// Pick exactly `target_count` tiles, all of them correct.
#[derive(Debug, Clone)]
pub struct GridPickerGame {
    tiles: Vec<Tile>,
    target_count: usize,
    selected: BTreeSet<usize>,
}

impl GridPickerGame {
    pub fn new(spec: GridPickerSpec) -> Self {
        Self {
            tiles: spec.tiles,
            target_count: spec.target_count,
            selected: BTreeSet::new(),
        }
    }

    pub fn toggle_tile(&mut self, index: usize) -> bool {
        if index >= self.tiles.len() {
            return false;
        }
        if !self.selected.remove(&index) {
            self.selected.insert(index);
        }
        true
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }
}

impl Widget for GridPickerGame {
    fn apply(&mut self, input: &WidgetInput) -> bool {
        match input {
            WidgetInput::ToggleTile { index } => self.toggle_tile(*index),
            _ => false,
        }
    }

    fn is_solved(&self) -> bool {
        self.selected.len() == self.target_count
            && self.selected.iter().all(|&index| self.tiles[index].correct)
    }

    fn view(&self) -> WidgetView {
        WidgetView::GridPicker {
            tiles: self
                .tiles
                .iter()
                .enumerate()
                .map(|(index, tile)| TileView {
                    label: tile.label.clone(),
                    selected: self.selected.contains(&index),
                })
                .collect(),
            target_count: self.target_count,
        }
    }
}
