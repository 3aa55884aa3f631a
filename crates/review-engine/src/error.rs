//! Error taxonomy for the reviewer assignment engine
//!
//! Domain rule violations carry a stable machine-readable [`ErrorCode`].
//! Storage and connectivity failures are wrapped in
//! [`ReviewError::Database`], which has no code and must not be shown to
//! callers verbatim.

use sea_orm::{DbErr, SqlErr};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Machine-readable error code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Duplicate team name on create
    TeamExists,
    /// Duplicate pull request id on create
    PrExists,
    /// Mutation attempted on a merged pull request
    PrMerged,
    /// Reassignment target is not currently a reviewer
    NotAssigned,
    /// No eligible replacement reviewer
    NoCandidate,
    /// Missing team, user or pull request
    NotFound,
    /// Team creation names a user that belongs to another team
    UserInOtherTeam,
    /// Request failed field validation
    ValidationError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::TeamExists => "TEAM_EXISTS",
            ErrorCode::PrExists => "PR_EXISTS",
            ErrorCode::PrMerged => "PR_MERGED",
            ErrorCode::NotAssigned => "NOT_ASSIGNED",
            ErrorCode::NoCandidate => "NO_CANDIDATE",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::UserInOtherTeam => "USER_IN_OTHER_TEAM",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request field that failed validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Offending field, in wire naming (e.g. `members[1].user_id`)
    pub field: String,
    /// Human-readable explanation
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// A required field was missing or blank
    pub fn required(field: impl Into<String>) -> Self {
        let field = field.into();
        let message = format!("{} is required", field);
        Self { field, message }
    }
}

/// Errors returned by [`crate::ReviewService`] operations
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("team_name already exists")]
    TeamExists,

    #[error("PR id already exists")]
    PrExists,

    #[error("cannot reassign on merged PR")]
    PrMerged,

    #[error("reviewer is not assigned to this PR")]
    NotAssigned,

    #[error("no active replacement candidate in team")]
    NoCandidate,

    /// The payload names what was missing ("team", "user", ...)
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("user {user_id} already belongs to team {team_name}")]
    UserInOtherTeam { user_id: String, team_name: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Opaque infrastructure failure
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl ReviewError {
    /// Stable code for domain errors; `None` for infrastructure failures
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ReviewError::TeamExists => Some(ErrorCode::TeamExists),
            ReviewError::PrExists => Some(ErrorCode::PrExists),
            ReviewError::PrMerged => Some(ErrorCode::PrMerged),
            ReviewError::NotAssigned => Some(ErrorCode::NotAssigned),
            ReviewError::NoCandidate => Some(ErrorCode::NoCandidate),
            ReviewError::NotFound(_) => Some(ErrorCode::NotFound),
            ReviewError::UserInOtherTeam { .. } => Some(ErrorCode::UserInOtherTeam),
            ReviewError::Validation(_) => Some(ErrorCode::ValidationError),
            ReviewError::Database(_) => None,
        }
    }
}

pub type ReviewResult<T> = Result<T, ReviewError>;

/// Whether a storage error is a unique/primary key collision
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
