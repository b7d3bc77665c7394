use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameError {
    GameNotFound { game_id: String },
    SessionNotFound { session_id: String },
    AuthenticationRequired,
    InvalidCredentials,
    UsernameTaken { username: String },
    InvalidInput { message: String },
    InternalError { message: String },
}

impl GameError {
    pub fn message(&self) -> String {
        match self {
            GameError::GameNotFound { game_id } => format!("Game not found: {}", game_id),
            GameError::SessionNotFound { session_id } => {
                format!("Session not found: {}", session_id)
            }
            GameError::AuthenticationRequired => "Authentication required".to_string(),
            GameError::InvalidCredentials => "Invalid username or password".to_string(),
            GameError::UsernameTaken { username } => {
                format!("Username already taken: {}", username)
            }
            GameError::InvalidInput { message } => message.clone(),
            GameError::InternalError { message } => message.clone(),
        }
    }
}
