//! Reviewer assignment engine
//!
//! Owns the rules for teams, users and pull requests:
//! - new pull requests get up to two active teammates of the author as
//!   reviewers, picked deterministically by ascending user id
//! - a reviewer of an open pull request can be swapped for a random eligible
//!   teammate of the reviewer being replaced
//! - deactivating users drops them from every open pull request
//! - merged pull requests are frozen
//!
//! State lives in the database behind [`review_db`]; [`ReviewService`] is the
//! single entry point and is cheap to clone.

pub mod error;
pub mod model;
pub mod picker;
pub mod requests;
mod service;

pub use error::{ErrorCode, ReviewError, ReviewResult, ValidationError};
pub use model::{
    AssignmentStats, PrAssignmentStat, PullRequest, PullRequestShort, PullRequestStatus,
    Reassignment, Team, TeamMember, User, UserAssignmentStat,
};
pub use picker::{CandidatePicker, UniformPicker};
pub use requests::{
    CreatePullRequestRequest, CreateTeamRequest, DeactivateTeamRequest, MergePullRequestRequest,
    NewPullRequest, NewTeam, NewTeamMember, ReassignReviewerRequest, SetIsActiveRequest,
    TeamMemberInput, TeamQuery, UserReviewsQuery,
};
pub use service::ReviewService;
