//! Domain model: teams, users, pull requests and assignment statistics
//!
//! These are the shapes the engine hands back to callers. Field names follow
//! the wire contract (`team_name`, `pull_request_id`, `createdAt`, ...).

use chrono::{DateTime, Utc};
use review_db::entities::{pull_request, user};
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Member of a team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct TeamMember {
    pub user_id: String,
    pub username: String,
    pub is_active: bool,
}

/// Team with its members ordered by user id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Team {
    pub team_name: String,
    pub members: Vec<TeamMember>,
}

/// User with its owning team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct User {
    pub user_id: String,
    pub username: String,
    pub team_name: String,
    pub is_active: bool,
}

/// Pull request lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PullRequestStatus {
    Open,
    /// Terminal: reviewers and merge time are frozen
    Merged,
}

/// Pull request with its ordered reviewer set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PullRequest {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: PullRequestStatus,
    /// At most two user ids, never the author, no duplicates
    pub assigned_reviewers: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "mergedAt", default, skip_serializing_if = "Option::is_none")]
    pub merged_at: Option<DateTime<Utc>>,
}

/// Pull request summary used in review listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PullRequestShort {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: PullRequestStatus,
}

/// Result of a successful reviewer reassignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reassignment {
    pub pull_request: PullRequest,
    /// The reviewer that took the old reviewer's slot
    pub replaced_by: String,
}

/// Number of pull requests a user currently reviews
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UserAssignmentStat {
    pub user_id: String,
    pub assignments: u64,
}

/// Current reviewer-set size of a pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PrAssignmentStat {
    pub pull_request_id: String,
    pub assignments: u64,
}

/// Assignment counts grouped by user and by pull request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AssignmentStats {
    pub by_user: Vec<UserAssignmentStat>,
    pub by_pr: Vec<PrAssignmentStat>,
}

impl From<pull_request::PullRequestStatus> for PullRequestStatus {
    fn from(status: pull_request::PullRequestStatus) -> Self {
        match status {
            pull_request::PullRequestStatus::Open => PullRequestStatus::Open,
            pull_request::PullRequestStatus::Merged => PullRequestStatus::Merged,
        }
    }
}

impl From<user::Model> for User {
    fn from(model: user::Model) -> Self {
        Self {
            user_id: model.id,
            username: model.name,
            team_name: model.team_name,
            is_active: model.is_active,
        }
    }
}

impl From<user::Model> for TeamMember {
    fn from(model: user::Model) -> Self {
        Self {
            user_id: model.id,
            username: model.name,
            is_active: model.is_active,
        }
    }
}

impl From<pull_request::Model> for PullRequestShort {
    fn from(model: pull_request::Model) -> Self {
        Self {
            pull_request_id: model.id,
            pull_request_name: model.name,
            author_id: model.author_id,
            status: model.status.into(),
        }
    }
}

impl PullRequest {
    /// Combine a stored pull request row with its reviewer ids (slot order)
    pub fn from_model(model: pull_request::Model, assigned_reviewers: Vec<String>) -> Self {
        Self {
            pull_request_id: model.id,
            pull_request_name: model.name,
            author_id: model.author_id,
            status: model.status.into(),
            assigned_reviewers,
            created_at: model.created_at,
            merged_at: model.merged_at,
        }
    }

    pub fn is_merged(&self) -> bool {
        self.status == PullRequestStatus::Merged
    }
}
