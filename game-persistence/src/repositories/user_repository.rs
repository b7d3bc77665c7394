use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::entities::{prelude::*, users};
use game_types::{UserProfile, UserRole};

pub struct UserRepository {
    db: DatabaseConnection,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub user: UserProfile,
    pub rank: u32,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub display_name: String,
    pub role: UserRole,
}

/// A stored user together with the credentials needed for sign-in
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub password: String,
    pub profile: UserProfile,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_profile(model: &users::Model) -> UserProfile {
        UserProfile {
            username: model.username.clone(),
            display_name: model.display_name.clone(),
            // Unknown roles in old rows fall back to the least privileged one
            role: UserRole::parse(&model.role).unwrap_or(UserRole::Student),
            total_points: model.total_points,
            created_at: model.created_at.to_rfc3339(),
        }
    }

    fn model_to_record(model: users::Model) -> UserRecord {
        UserRecord {
            id: model.id,
            profile: Self::model_to_profile(&model),
            password: model.password,
        }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        let user_model = Users::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await?;

        Ok(user_model.map(Self::model_to_record))
    }

    pub async fn find_profile(&self, username: &str) -> Result<Option<UserProfile>> {
        Ok(self
            .find_by_username(username)
            .await?
            .map(|record| record.profile))
    }

    pub async fn create_user(&self, user: NewUser) -> Result<UserProfile> {
        let now = chrono::Utc::now().into();
        let id = Uuid::new_v4();

        let user_model = users::ActiveModel {
            id: sea_orm::ActiveValue::Set(id),
            username: sea_orm::ActiveValue::Set(user.username),
            password: sea_orm::ActiveValue::Set(user.password),
            display_name: sea_orm::ActiveValue::Set(user.display_name),
            role: sea_orm::ActiveValue::Set(user.role.as_str().to_string()),
            total_points: sea_orm::ActiveValue::Set(0),
            created_at: sea_orm::ActiveValue::Set(now),
            updated_at: sea_orm::ActiveValue::Set(now),
        };

        Users::insert(user_model).exec(&self.db).await?;

        // Fetch the created user
        let created_user = Users::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to retrieve created user"))?;

        Ok(Self::model_to_profile(&created_user))
    }

    pub async fn get_leaderboard(&self, limit: u64) -> Result<Vec<LeaderboardEntry>> {
        let users = Users::find()
            .filter(users::Column::Role.eq(UserRole::Student.as_str()))
            .order_by_desc(users::Column::TotalPoints)
            .limit(limit)
            .all(&self.db)
            .await?;

        let leaderboard = users
            .iter()
            .enumerate()
            .map(|(index, model)| LeaderboardEntry {
                user: Self::model_to_profile(model),
                rank: (index + 1) as u32,
            })
            .collect();

        Ok(leaderboard)
    }
}
