//! Database entities

pub mod pull_request;
pub mod pull_request_reviewer;
pub mod team;
pub mod user;

pub use pull_request::Entity as PullRequest;
pub use pull_request_reviewer::Entity as PullRequestReviewer;
pub use team::Entity as Team;
pub use user::Entity as User;

pub mod prelude {
    pub use super::pull_request::Entity as PullRequest;
    pub use super::pull_request_reviewer::Entity as PullRequestReviewer;
    pub use super::team::Entity as Team;
    pub use super::user::Entity as User;
}
