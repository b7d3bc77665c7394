pub use super::game_completions::Entity as GameCompletions;
pub use super::users::Entity as Users;
