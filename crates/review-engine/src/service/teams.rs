use chrono::Utc;
use review_db::entities::{team, user};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::{debug, info};

use super::ReviewService;
use crate::error::{is_unique_violation, ReviewError, ReviewResult};
use crate::model::{Team, TeamMember};
use crate::requests::NewTeam;

impl ReviewService {
    /// Create a team and its members in one transaction.
    ///
    /// Fails with `TEAM_EXISTS` if the name is taken and with
    /// `USER_IN_OTHER_TEAM` if any member id already exists; a user's team
    /// is fixed at creation.
    pub async fn create_team(&self, new_team: NewTeam) -> ReviewResult<Team> {
        let txn = self.db.begin().await?;

        if team::Entity::find_by_id(new_team.name.as_str())
            .one(&txn)
            .await?
            .is_some()
        {
            return Err(ReviewError::TeamExists);
        }

        team::ActiveModel {
            name: Set(new_team.name.clone()),
            created_at: Set(Utc::now()),
        }
        .insert(&txn)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ReviewError::TeamExists
            } else {
                ReviewError::Database(e)
            }
        })?;

        let member_ids: Vec<String> = new_team.members.iter().map(|m| m.id.clone()).collect();
        if !member_ids.is_empty() {
            if let Some(existing) = user::Entity::find()
                .filter(user::Column::Id.is_in(member_ids))
                .order_by_asc(user::Column::Id)
                .one(&txn)
                .await?
            {
                return Err(ReviewError::UserInOtherTeam {
                    user_id: existing.id,
                    team_name: existing.team_name,
                });
            }
        }

        let now = Utc::now();
        let mut members = Vec::with_capacity(new_team.members.len());
        for member in new_team.members {
            let created = user::ActiveModel {
                id: Set(member.id),
                name: Set(member.name),
                team_name: Set(new_team.name.clone()),
                is_active: Set(member.is_active),
                created_at: Set(now),
            }
            .insert(&txn)
            .await?;
            members.push(TeamMember::from(created));
        }

        txn.commit().await?;

        members.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        info!(
            team = %new_team.name,
            members = members.len(),
            "Created team"
        );

        Ok(Team {
            team_name: new_team.name,
            members,
        })
    }

    /// Team with members ordered by user id
    pub async fn get_team(&self, team_name: &str) -> ReviewResult<Team> {
        debug!("Getting team: {}", team_name);

        let team = team::Entity::find_by_id(team_name)
            .one(&self.db)
            .await?
            .ok_or(ReviewError::NotFound("team"))?;

        let members = user::Entity::find()
            .filter(user::Column::TeamName.eq(team.name.as_str()))
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?;

        Ok(Team {
            team_name: team.name,
            members: members.into_iter().map(TeamMember::from).collect(),
        })
    }
}
