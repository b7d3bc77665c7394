use game_types::{WidgetInput, WidgetView};
use serde::{Deserialize, Serialize};

use super::Widget;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepperSpec {
    pub steps: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct StepperGame {
    steps: Vec<String>,
    step_index: usize,
}

impl StepperGame {
    pub fn new(spec: StepperSpec) -> Self {
        Self {
            steps: spec.steps,
            step_index: 0,
        }
    }

    pub fn advance(&mut self) -> bool {
        if self.step_index < self.steps.len() {
            self.step_index += 1;
            true
        } else {
            false
        }
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }
}

impl Widget for StepperGame {
    fn apply(&mut self, input: &WidgetInput) -> bool {
        match input {
            WidgetInput::Advance => self.advance(),
            _ => false,
        }
    }

    fn is_solved(&self) -> bool {
        self.step_index >= self.steps.len()
    }

    // The click on the last step is the finishing click
    fn completes_on_solve(&self) -> bool {
        true
    }

    fn view(&self) -> WidgetView {
        WidgetView::Stepper {
            step_index: self.step_index,
            total_steps: self.steps.len(),
            current_step: self.steps.get(self.step_index).cloned(),
        }
    }
}
