pub mod badges;
pub mod catalog;
pub mod exercises;
pub mod game_events;
pub mod host;
pub mod session;
pub mod widgets;

// Re-export main components
pub use badges::*;
pub use catalog::*;
pub use exercises::*;
pub use game_events::*;
pub use host::*;
pub use session::*;
pub use widgets::{GameWidget, Widget, WidgetOutcome, WidgetSpec};
