use std::collections::HashMap;

use game_types::GameId;

use crate::widgets::{
    GameWidget, GridPickerSpec, HabitFixSpec, Hazard, QuizQuestion, QuizSpec, ReorderSpec,
    SegregationSpec, SortItem, StepperSpec, Tile, WidgetSpec,
};

/// Exercise content for each playable game, keyed by game id.
#[derive(Debug, Clone, Default)]
pub struct ExerciseLibrary {
    specs: HashMap<GameId, WidgetSpec>,
}

impl ExerciseLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut library = Self::new();
        library.insert("waste-sorting", waste_sorting());
        library.insert("fix-the-habits", fix_the_habits());
        library.insert("climate-quiz", climate_quiz());
        library.insert("food-chain", food_chain());
        library.insert("plant-a-tree", plant_a_tree());
        library.insert("spot-the-recyclables", spot_the_recyclables());
        library
    }

    pub fn insert(&mut self, game_id: impl Into<GameId>, spec: WidgetSpec) {
        self.specs.insert(game_id.into(), spec);
    }

    pub fn spec_for(&self, game_id: &str) -> Option<&WidgetSpec> {
        self.specs.get(game_id)
    }

    /// A fresh widget for `game_id`, or the placeholder if there is no exercise
    pub fn mount(&self, game_id: &str) -> GameWidget {
        match self.spec_for(game_id) {
            Some(spec) => spec.clone().build(),
            None => GameWidget::not_implemented(game_id),
        }
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn waste_sorting() -> WidgetSpec {
    let item = |id: &str, label: &str, bin: &str| SortItem {
        id: id.to_string(),
        label: label.to_string(),
        correct_bin: bin.to_string(),
    };
    WidgetSpec::Segregation(SegregationSpec {
        bins: strings(&["organic", "recyclable", "non"]),
        items: vec![
            item("banana", "Banana peel", "organic"),
            item("bottle", "Plastic bottle", "recyclable"),
            item("paper", "Newspaper", "recyclable"),
            item("chip", "Chip packet", "non"),
        ],
    })
}

fn fix_the_habits() -> WidgetSpec {
    let hazard = |id: &str, label: &str| Hazard {
        id: id.to_string(),
        label: label.to_string(),
    };
    WidgetSpec::HabitFix(HabitFixSpec {
        hazards: vec![
            hazard("tap", "Dripping tap"),
            hazard("lights", "Lights left on in an empty room"),
            hazard("tv", "TV on standby"),
            hazard("fridge", "Fridge door left open"),
        ],
    })
}

fn climate_quiz() -> WidgetSpec {
    let question = |prompt: &str, options: &[&str], answer_index: usize| QuizQuestion {
        prompt: prompt.to_string(),
        options: strings(options),
        answer_index: Some(answer_index),
    };
    WidgetSpec::Quiz(QuizSpec {
        questions: vec![
            question(
                "Which gas is the main cause of global warming?",
                &["Oxygen", "Carbon dioxide", "Nitrogen", "Helium"],
                1,
            ),
            question(
                "Which of these is a renewable energy source?",
                &["Coal", "Natural gas", "Wind", "Oil"],
                2,
            ),
            question(
                "What do trees absorb from the air?",
                &["Carbon dioxide", "Smoke only", "Nothing"],
                0,
            ),
            question(
                "Which way of getting to school has the lowest emissions?",
                &["Car", "Bus", "Walking"],
                2,
            ),
        ],
    })
}

fn food_chain() -> WidgetSpec {
    WidgetSpec::Reorder(ReorderSpec {
        tokens: strings(&["hawk", "grass", "snake", "grasshopper", "frog"]),
        target: strings(&["grass", "grasshopper", "frog", "snake", "hawk"]),
    })
}

fn plant_a_tree() -> WidgetSpec {
    WidgetSpec::Stepper(StepperSpec {
        steps: strings(&[
            "Choose a sunny spot",
            "Dig a hole twice as wide as the roots",
            "Place the sapling in the hole",
            "Fill the hole with soil",
            "Water the tree",
        ]),
    })
}

fn spot_the_recyclables() -> WidgetSpec {
    let tile = |label: &str, correct: bool| Tile {
        label: label.to_string(),
        correct,
    };
    WidgetSpec::GridPicker(GridPickerSpec {
        tiles: vec![
            tile("Aluminium can", true),
            tile("Banana peel", false),
            tile("Glass jar", true),
            tile("Cardboard box", true),
            tile("Used tissue", false),
            tile("Plastic bottle", true),
            tile("Chip packet", false),
            tile("Broken mirror", false),
            tile("Pizza crust", false),
        ],
        target_count: 4,
    })
}
