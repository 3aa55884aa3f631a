use review_db::entities::{team, user};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use tracing::{debug, info};

use super::{remove_from_open_reviews, ReviewService};
use crate::error::{ReviewError, ReviewResult};
use crate::model::{Team, TeamMember, User};

impl ReviewService {
    /// Set a user's activity flag.
    ///
    /// Deactivating also removes the user from the reviewer set of every
    /// open pull request in the same transaction. Reactivating restores
    /// nothing.
    pub async fn set_user_active(&self, user_id: &str, is_active: bool) -> ReviewResult<User> {
        let txn = self.db.begin().await?;

        let existing = user::Entity::find_by_id(user_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(ReviewError::NotFound("user"))?;

        let mut active: user::ActiveModel = existing.into();
        active.is_active = Set(is_active);
        let updated = active.update(&txn).await?;

        if !is_active {
            let removed = remove_from_open_reviews(&txn, vec![updated.id.clone()]).await?;
            debug!(
                "Removed user {} from {} open review slot(s)",
                updated.id, removed
            );
        }

        txn.commit().await?;

        info!(user = %updated.id, is_active, "Updated user activity");

        Ok(User::from(updated))
    }

    /// Deactivate every member of a team and strip them from all open
    /// pull requests in one transaction. Merged pull requests are left as
    /// they are.
    pub async fn deactivate_team_members(&self, team_name: &str) -> ReviewResult<Team> {
        let txn = self.db.begin().await?;

        let team = team::Entity::find_by_id(team_name)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(ReviewError::NotFound("team"))?;

        let members = user::Entity::find()
            .filter(user::Column::TeamName.eq(team.name.as_str()))
            .order_by_asc(user::Column::Id)
            .lock_exclusive()
            .all(&txn)
            .await?;

        user::Entity::update_many()
            .col_expr(user::Column::IsActive, Expr::value(false))
            .filter(user::Column::TeamName.eq(team.name.as_str()))
            .exec(&txn)
            .await?;

        let member_ids: Vec<String> = members.iter().map(|m| m.id.clone()).collect();
        let removed = remove_from_open_reviews(&txn, member_ids).await?;

        txn.commit().await?;

        info!(
            team = %team.name,
            members = members.len(),
            removed_slots = removed,
            "Deactivated team members"
        );

        Ok(Team {
            team_name: team.name,
            members: members
                .into_iter()
                .map(|m| TeamMember {
                    is_active: false,
                    ..TeamMember::from(m)
                })
                .collect(),
        })
    }
}
