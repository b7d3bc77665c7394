#![allow(dead_code)]

use game_core::{CompletionSink, ExerciseLibrary, GameCatalog, GameHost};
use game_types::{CompletionEvent, WidgetInput};
use std::sync::{Arc, Mutex};

/// Sink that can be inspected after being moved into a host
#[derive(Clone, Default)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<CompletionEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_events(&self) -> Vec<CompletionEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn last_event(&self) -> Option<CompletionEvent> {
        self.events.lock().unwrap().last().cloned()
    }
}

impl CompletionSink for EventCollector {
    fn on_completed(&mut self, event: CompletionEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Creates a host over the builtin catalog and exercises
pub fn create_test_host() -> (GameHost<EventCollector>, EventCollector) {
    let collector = EventCollector::new();
    let host = GameHost::new(
        Arc::new(GameCatalog::builtin()),
        Arc::new(ExerciseLibrary::builtin()),
        collector.clone(),
    );
    (host, collector)
}

pub fn drop_item(item: &str, bin: &str) -> WidgetInput {
    WidgetInput::Drop {
        item: item.to_string(),
        bin: bin.to_string(),
    }
}

pub fn toggle(hazard: &str) -> WidgetInput {
    WidgetInput::Toggle {
        hazard: hazard.to_string(),
    }
}

/// Feeds a sequence of inputs, returning how many were applied
pub fn play<S: CompletionSink>(host: &mut GameHost<S>, inputs: &[WidgetInput]) -> usize {
    inputs
        .iter()
        .filter(|input| host.handle(input).applied)
        .count()
}

/// Inputs that solve the builtin waste sorting exercise
pub fn waste_sorting_solution() -> Vec<WidgetInput> {
    vec![
        drop_item("banana", "organic"),
        drop_item("bottle", "recyclable"),
        drop_item("paper", "recyclable"),
        drop_item("chip", "non"),
    ]
}

/// Inputs that answer the builtin climate quiz, picking `choose(question)`
pub fn quiz_answers(choose: impl Fn(usize) -> usize) -> Vec<WidgetInput> {
    (0..4)
        .flat_map(|question| {
            vec![
                WidgetInput::SelectOption {
                    option: choose(question),
                },
                WidgetInput::NextQuestion,
            ]
        })
        .collect()
}
