use anyhow::Result;
use chrono::{DateTime, Datelike, Utc};
use sea_orm::sea_query::{Alias, Expr, Func};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait};
use uuid::Uuid;

use crate::entities::{game_completions, prelude::*, users};
use game_core::BadgeTracker;
use game_types::{CompletionEvent, GameCategory, ProgressSummary};

/// Stores completion events and aggregates them into progress summaries.
pub struct ProgressRepository {
    db: DatabaseConnection,
}

impl ProgressRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn record_completion(
        &self,
        username: &str,
        event: &CompletionEvent,
        category: GameCategory,
    ) -> Result<()> {
        self.record_completion_at(username, event, category, Utc::now())
            .await
    }

    /// Insert the completion row and bump the user's total in one transaction.
    /// The stored total saturates at `i32::MAX`.
    pub async fn record_completion_at(
        &self,
        username: &str,
        event: &CompletionEvent,
        category: GameCategory,
        completed_at: DateTime<Utc>,
    ) -> Result<()> {
        if event.points <= 0 {
            anyhow::bail!(
                "Refusing to record {} points for '{}'",
                event.points,
                event.game_id
            );
        }

        let txn = self.db.begin().await?;

        let user = Users::find()
            .filter(users::Column::Username.eq(username))
            .one(&txn)
            .await?
            .ok_or_else(|| anyhow::anyhow!("User not found: {}", username))?;

        let completion = game_completions::ActiveModel {
            id: sea_orm::ActiveValue::Set(Uuid::new_v4()),
            user_id: sea_orm::ActiveValue::Set(user.id),
            game_id: sea_orm::ActiveValue::Set(event.game_id.clone()),
            category: sea_orm::ActiveValue::Set(category.as_str().to_string()),
            points: sea_orm::ActiveValue::Set(event.points),
            score_percent: sea_orm::ActiveValue::Set(event.score_percent.map(i32::from)),
            completed_at: sea_orm::ActiveValue::Set(completed_at.into()),
        };
        GameCompletions::insert(completion).exec(&txn).await?;

        // Two-argument MIN is SQLite's scalar minimum
        let capped_total = Func::cust(Alias::new("MIN"))
            .arg(Expr::col(users::Column::TotalPoints).add(event.points))
            .arg(i32::MAX);
        let updated_at: sea_orm::prelude::DateTimeWithTimeZone = Utc::now().into();
        Users::update_many()
            .col_expr(users::Column::TotalPoints, capped_total.into())
            .col_expr(users::Column::UpdatedAt, Expr::value(updated_at))
            .filter(users::Column::Id.eq(user.id))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        tracing::debug!(
            "Recorded completion of '{}' for {} ({} points)",
            event.game_id,
            username,
            event.points
        );
        Ok(())
    }

    /// Aggregate a user's completions. Unknown users get an empty summary.
    pub async fn summary(&self, username: &str, now: DateTime<Utc>) -> Result<ProgressSummary> {
        let Some(user) = Users::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await?
        else {
            return Ok(ProgressSummary::default());
        };

        let completions = GameCompletions::find()
            .filter(game_completions::Column::UserId.eq(user.id))
            .all(&self.db)
            .await?;

        let mut tracker = BadgeTracker::new();
        let mut summary = ProgressSummary::default();

        for completion in &completions {
            let completed_at = completion.completed_at.with_timezone(&Utc);
            if completed_at.year() == now.year() && completed_at.month() == now.month() {
                summary.monthly_completions = summary.monthly_completions.saturating_add(1);
            }
            summary.total_points = summary.total_points.saturating_add(completion.points);
            summary.games_completed = summary.games_completed.saturating_add(1);

            let score_percent = completion
                .score_percent
                .and_then(|score| u8::try_from(score).ok());
            tracker.record(
                GameCategory::parse(&completion.category),
                completion.points,
                score_percent,
            );
        }

        summary.badges = tracker.badges();
        Ok(summary)
    }
}
