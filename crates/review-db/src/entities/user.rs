//! User entity. Users reference their team; they are never deleted.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// User ID (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Display name
    pub name: String,

    /// Owning team, set once at creation
    pub team_name: String,

    /// Whether the user can be picked as a reviewer
    pub is_active: bool,

    /// When the user was created
    pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// User belongs to a team
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::TeamName",
        to = "super::team::Column::Name",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Team,

    /// User authored pull requests
    #[sea_orm(has_many = "super::pull_request::Entity")]
    AuthoredPullRequests,

    /// User holds reviewer slots
    #[sea_orm(has_many = "super::pull_request_reviewer::Entity")]
    ReviewerSlots,
}

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Team.def()
    }
}

impl Related<super::pull_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AuthoredPullRequests.def()
    }
}

impl Related<super::pull_request_reviewer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReviewerSlots.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
