//! Wire envelopes around the engine's domain types

use review_engine::{PullRequest, PullRequestShort, Team, User};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Team wrapped for create / deactivate responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamResponse {
    pub team: Team,
}

/// User wrapped for activity updates
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub user: User,
}

/// Pull request wrapped for create / merge responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PullRequestResponse {
    pub pr: PullRequest,
}

/// Reassignment outcome
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReassignResponse {
    pub pr: PullRequest,
    /// User id that took over the replaced reviewer's slot
    pub replaced_by: String,
}

/// Pull requests a user currently reviews
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserReviewsResponse {
    pub user_id: String,
    pub pull_requests: Vec<PullRequestShort>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
}

/// Error payload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Machine-readable code, e.g. `NO_CANDIDATE` or `INTERNAL`
    pub code: String,
    /// Human-readable message
    pub message: String,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
        }
    }
}
