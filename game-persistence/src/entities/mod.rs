pub mod prelude;

pub mod game_completions;
pub mod users;
