use game_types::CompletionEvent;

/// Receiver of completion events produced by a host
pub trait CompletionSink {
    fn on_completed(&mut self, event: CompletionEvent);
}

impl CompletionSink for Vec<CompletionEvent> {
    fn on_completed(&mut self, event: CompletionEvent) {
        self.push(event);
    }
}

impl<S: CompletionSink + ?Sized> CompletionSink for Box<S> {
    fn on_completed(&mut self, event: CompletionEvent) {
        (**self).on_completed(event);
    }
}

/// Simple event bus for distributing completion events to several sinks
pub struct GameEventBus {
    handlers: Vec<Box<dyn CompletionSink + Send>>,
}

impl GameEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn CompletionSink + Send>) {
        self.handlers.push(handler);
    }

    pub fn publish(&mut self, event: CompletionEvent) {
        for handler in &mut self.handlers {
            handler.on_completed(event.clone());
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

impl Default for GameEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionSink for GameEventBus {
    fn on_completed(&mut self, event: CompletionEvent) {
        self.publish(event);
    }
}
