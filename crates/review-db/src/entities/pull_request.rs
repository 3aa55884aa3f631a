//! Pull request entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a pull request. MERGED is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum PullRequestStatus {
    #[sea_orm(string_value = "OPEN")]
    Open,

    #[sea_orm(string_value = "MERGED")]
    Merged,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pull_requests")]
pub struct Model {
    /// Pull request ID (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Pull request title
    pub name: String,

    /// Author user ID
    pub author_id: String,

    /// OPEN or MERGED
    pub status: PullRequestStatus,

    /// Set at insert, never changed
    pub created_at: ChronoDateTimeUtc,

    /// Set exactly once, when the status becomes MERGED
    pub merged_at: Option<ChronoDateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Pull request belongs to its author
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Author,

    /// Pull request has reviewer slots
    #[sea_orm(has_many = "super::pull_request_reviewer::Entity")]
    Reviewers,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::pull_request_reviewer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviewers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
