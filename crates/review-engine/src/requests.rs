//! Typed request payloads and their validation
//!
//! Missing string fields deserialize to empty strings so that validation,
//! not the decoder, reports which field is absent.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::ValidationError;

#[cfg(feature = "openapi")]
use utoipa::{IntoParams, ToSchema};

fn require(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(())
}

/// Team member as submitted on team creation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct TeamMemberInput {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub is_active: bool,
}

/// Request to create a team together with its members
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreateTeamRequest {
    #[serde(default)]
    pub team_name: String,
    #[serde(default)]
    pub members: Vec<TeamMemberInput>,
}

/// Validated team creation input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeam {
    pub name: String,
    pub members: Vec<NewTeamMember>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeamMember {
    pub id: String,
    pub name: String,
    pub is_active: bool,
}

impl CreateTeamRequest {
    pub fn validate(self) -> Result<NewTeam, ValidationError> {
        require("team_name", &self.team_name)?;

        let mut seen = HashSet::new();
        let mut members = Vec::with_capacity(self.members.len());
        for (i, member) in self.members.into_iter().enumerate() {
            require(&format!("members[{}].user_id", i), &member.user_id)?;
            require(&format!("members[{}].username", i), &member.username)?;
            if !seen.insert(member.user_id.clone()) {
                return Err(ValidationError::new(
                    format!("members[{}].user_id", i),
                    format!("duplicate member user_id {}", member.user_id),
                ));
            }
            members.push(NewTeamMember {
                id: member.user_id,
                name: member.username,
                is_active: member.is_active,
            });
        }

        Ok(NewTeam {
            name: self.team_name,
            members,
        })
    }
}

/// Request to deactivate every member of a team
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct DeactivateTeamRequest {
    #[serde(default)]
    pub team_name: String,
}

impl DeactivateTeamRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("team_name", &self.team_name)
    }
}

/// Query for a single team
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct TeamQuery {
    /// Team name
    #[serde(default)]
    pub team_name: String,
}

impl TeamQuery {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("team_name", &self.team_name)
    }
}

/// Request to flip a user's active flag
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SetIsActiveRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub is_active: bool,
}

impl SetIsActiveRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("user_id", &self.user_id)
    }
}

/// Query for the pull requests a user reviews
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct UserReviewsQuery {
    /// Reviewer user id
    #[serde(default)]
    pub user_id: String,
}

impl UserReviewsQuery {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("user_id", &self.user_id)
    }
}

/// Request to open a pull request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreatePullRequestRequest {
    #[serde(default)]
    pub pull_request_id: String,
    #[serde(default)]
    pub pull_request_name: String,
    #[serde(default)]
    pub author_id: String,
}

/// Validated pull request creation input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPullRequest {
    pub id: String,
    pub name: String,
    pub author_id: String,
}

impl CreatePullRequestRequest {
    pub fn validate(self) -> Result<NewPullRequest, ValidationError> {
        require("pull_request_id", &self.pull_request_id)?;
        require("pull_request_name", &self.pull_request_name)?;
        require("author_id", &self.author_id)?;

        Ok(NewPullRequest {
            id: self.pull_request_id,
            name: self.pull_request_name,
            author_id: self.author_id,
        })
    }
}

/// Request to merge a pull request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct MergePullRequestRequest {
    #[serde(default)]
    pub pull_request_id: String,
}

impl MergePullRequestRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("pull_request_id", &self.pull_request_id)
    }
}

/// Request to replace one reviewer of an open pull request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ReassignReviewerRequest {
    #[serde(default)]
    pub pull_request_id: String,
    #[serde(default)]
    pub old_user_id: String,
}

impl ReassignReviewerRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("pull_request_id", &self.pull_request_id)?;
        require("old_user_id", &self.old_user_id)
    }
}
