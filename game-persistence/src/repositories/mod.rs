pub mod progress_repository;
pub mod user_repository;

pub use progress_repository::ProgressRepository;
pub use user_repository::{LeaderboardEntry, NewUser, UserRecord, UserRepository};
