use game_types::{WidgetInput, WidgetView};
use serde::{Deserialize, Serialize};

use super::Widget;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderSpec {
    pub tokens: Vec<String>,
    pub target: Vec<String>,
}

/// Tokens are reordered by swapping a token with its right-hand neighbour.
/// The last token wraps around to swap with the first.
#[derive(Debug, Clone)]
pub struct ReorderGame {
    tokens: Vec<String>,
    target: Vec<String>,
}

impl ReorderGame {
    pub fn new(spec: ReorderSpec) -> Self {
        Self {
            tokens: spec.tokens,
            target: spec.target,
        }
    }

    pub fn swap(&mut self, index: usize) -> bool {
        let len = self.tokens.len();
        if len < 2 || index >= len {
            return false;
        }
        self.tokens.swap(index, (index + 1) % len);
        true
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

impl Widget for ReorderGame {
    fn apply(&mut self, input: &WidgetInput) -> bool {
        match input {
            WidgetInput::Swap { index } => self.swap(*index),
            _ => false,
        }
    }

    fn is_solved(&self) -> bool {
        self.tokens == self.target
    }

    fn view(&self) -> WidgetView {
        WidgetView::Reorder {
            tokens: self.tokens.clone(),
        }
    }
}
