//! Reviewer slot of a pull request
//!
//! A pull request's reviewer sequence is its rows ordered by `slot`. The slot
//! range (0..=1) caps the sequence at two entries and the unique
//! `(pull_request_id, user_id)` index rules out duplicates.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Number of reviewer slots per pull request
pub const MAX_REVIEWERS: usize = 2;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pull_request_reviewers")]
pub struct Model {
    /// Pull request ID (composite primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub pull_request_id: String,

    /// Position in the reviewer sequence (composite primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub slot: i32,

    /// Assigned reviewer
    pub user_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pull_request::Entity",
        from = "Column::PullRequestId",
        to = "super::pull_request::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    PullRequest,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    User,
}

impl Related<super::pull_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PullRequest.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
