use std::sync::Arc;

use game_persistence::repositories::{NewUser, UserRepository};
use game_types::{SignInRequest, SignUpRequest, UserProfile, UserRole};

pub const USERNAME_HEADER: &str = "x-username";
pub const ROLE_HEADER: &str = "x-role";

/// The caller as identified by the client. These headers are trusted as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    pub username: String,
    pub role: UserRole,
}

impl UserContext {
    /// Build a context from the raw headers. A missing role means student.
    pub fn from_headers(username: Option<String>, role: Option<String>) -> Option<Self> {
        let username = username?.trim().to_string();
        if username.is_empty() {
            return None;
        }

        let role = role
            .as_deref()
            .and_then(UserRole::parse)
            .unwrap_or(UserRole::Student);

        Some(Self { username, role })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Username already taken: {0}")]
    UsernameTaken(String),
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Storage error: {0}")]
    Storage(anyhow::Error),
}

pub struct AuthService {
    users: Arc<UserRepository>,
}

impl AuthService {
    pub fn new(users: Arc<UserRepository>) -> Self {
        Self { users }
    }

    pub async fn sign_up(&self, request: SignUpRequest) -> Result<UserProfile, AuthError> {
        let username = request.username.trim().to_string();
        if username.is_empty() {
            return Err(AuthError::InvalidInput("username is required".to_string()));
        }
        if request.password.is_empty() {
            return Err(AuthError::InvalidInput("password is required".to_string()));
        }

        let existing = self
            .users
            .find_by_username(&username)
            .await
            .map_err(AuthError::Storage)?;
        if existing.is_some() {
            return Err(AuthError::UsernameTaken(username));
        }

        let display_name = request
            .display_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| username.clone());

        let profile = self
            .users
            .create_user(NewUser {
                username,
                password: request.password,
                display_name,
                role: request.role,
            })
            .await
            .map_err(AuthError::Storage)?;

        tracing::info!("New {} account: {}", profile.role.as_str(), profile.username);
        Ok(profile)
    }

    pub async fn sign_in(&self, request: SignInRequest) -> Result<UserProfile, AuthError> {
        let record = self
            .users
            .find_by_username(request.username.trim())
            .await
            .map_err(AuthError::Storage)?
            .ok_or(AuthError::InvalidCredentials)?;

        if record.password != request.password {
            tracing::debug!("Password mismatch for {}", record.profile.username);
            return Err(AuthError::InvalidCredentials);
        }

        Ok(record.profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_persistence::connection::connect_to_memory_database;
    use migration::{Migrator, MigratorTrait};

    async fn create_test_service() -> AuthService {
        let db = connect_to_memory_database().await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        AuthService::new(Arc::new(UserRepository::new(db)))
    }

    fn sign_up_request(username: &str, password: &str) -> SignUpRequest {
        SignUpRequest {
            username: username.to_string(),
            password: password.to_string(),
            display_name: None,
            role: UserRole::Student,
        }
    }

    #[test]
    fn test_user_context_from_headers() {
        let context =
            UserContext::from_headers(Some("alice".to_string()), Some("Teacher".to_string()))
                .unwrap();
        assert_eq!(context.username, "alice");
        assert_eq!(context.role, UserRole::Teacher);

        let context = UserContext::from_headers(Some("bob".to_string()), None).unwrap();
        assert_eq!(context.role, UserRole::Student);

        let context =
            UserContext::from_headers(Some("bob".to_string()), Some("wizard".to_string()))
                .unwrap();
        assert_eq!(context.role, UserRole::Student);

        assert!(UserContext::from_headers(None, Some("admin".to_string())).is_none());
        assert!(UserContext::from_headers(Some("  ".to_string()), None).is_none());
    }

    #[tokio::test]
    async fn test_sign_up_then_sign_in() {
        let service = create_test_service().await;

        let profile = service
            .sign_up(sign_up_request("alice", "pw"))
            .await
            .unwrap();
        assert_eq!(profile.display_name, "alice");

        let signed_in = service
            .sign_in(SignInRequest {
                username: "alice".to_string(),
                password: "pw".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(signed_in.username, "alice");
        assert_eq!(signed_in.role, UserRole::Student);
    }

    #[tokio::test]
    async fn test_wrong_password_rejected() {
        let service = create_test_service().await;
        service
            .sign_up(sign_up_request("alice", "pw"))
            .await
            .unwrap();

        let result = service
            .sign_in(SignInRequest {
                username: "alice".to_string(),
                password: "PW".to_string(),
            })
            .await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));

        let result = service
            .sign_in(SignInRequest {
                username: "nobody".to_string(),
                password: "pw".to_string(),
            })
            .await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_sign_up_validation() {
        let service = create_test_service().await;

        let result = service.sign_up(sign_up_request(" ", "pw")).await;
        assert!(matches!(result, Err(AuthError::InvalidInput(_))));

        let result = service.sign_up(sign_up_request("alice", "")).await;
        assert!(matches!(result, Err(AuthError::InvalidInput(_))));

        service
            .sign_up(sign_up_request("alice", "pw"))
            .await
            .unwrap();
        let result = service.sign_up(sign_up_request("alice", "other")).await;
        assert!(matches!(result, Err(AuthError::UsernameTaken(name)) if name == "alice"));
    }
}
