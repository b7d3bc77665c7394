use std::collections::HashMap;

use game_types::{HazardView, WidgetInput, WidgetView};
use serde::{Deserialize, Serialize};

use super::Widget;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hazard {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitFixSpec {
    pub hazards: Vec<Hazard>,
}

/// Click-to-toggle hazards until every one is fixed.
#[derive(Debug, Clone)]
pub struct HabitFixGame {
    hazards: Vec<Hazard>,
    fixed: HashMap<String, bool>,
}

impl HabitFixGame {
    pub fn new(spec: HabitFixSpec) -> Self {
        let fixed = spec
            .hazards
            .iter()
            .map(|hazard| (hazard.id.clone(), false))
            .collect();
        Self {
            hazards: spec.hazards,
            fixed,
        }
    }

    pub fn toggle(&mut self, hazard: &str) -> bool {
        match self.fixed.get_mut(hazard) {
            Some(fixed) => {
                *fixed = !*fixed;
                true
            }
            None => false,
        }
    }

    pub fn is_fixed(&self, hazard: &str) -> bool {
        self.fixed.get(hazard).copied().unwrap_or(false)
    }
}

impl Widget for HabitFixGame {
    fn apply(&mut self, input: &WidgetInput) -> bool {
        match input {
            WidgetInput::Toggle { hazard } => self.toggle(hazard),
            _ => false,
        }
    }

    fn is_solved(&self) -> bool {
        self.fixed.values().all(|&fixed| fixed)
    }

    fn view(&self) -> WidgetView {
        WidgetView::HabitFix {
            hazards: self
                .hazards
                .iter()
                .map(|hazard| HazardView {
                    id: hazard.id.clone(),
                    label: hazard.label.clone(),
                    fixed: self.is_fixed(&hazard.id),
                })
                .collect(),
        }
    }
}
