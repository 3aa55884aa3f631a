//! Reviewer assignment service
//!
//! Every operation runs against the injected [`DatabaseConnection`]. Those
//! that read state and then write derived state open one transaction and
//! lock the rows they depend on for its whole duration. The engine keeps no
//! cache and never retries: a failed transaction is rolled back on drop and
//! the error goes to the caller.
//!
//! Lock order: pull request rows are taken `FOR UPDATE` before their reviewer
//! slots change, and candidate users are read `FOR SHARE`. A deactivation
//! crossing a reassignment on the same team can still deadlock on
//! PostgreSQL; the database aborts one side and it surfaces as
//! [`crate::ReviewError::Database`].

mod assignment;
mod deactivation;
mod reassignment;
mod stats;
mod teams;

use std::sync::Arc;

use review_db::entities::{pull_request, pull_request_reviewer};
use sea_orm::{
    sea_query::{Query, SelectStatement},
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use crate::picker::{CandidatePicker, UniformPicker};

/// Entry point for team, user and pull request operations
#[derive(Clone)]
pub struct ReviewService {
    db: DatabaseConnection,
    picker: Arc<dyn CandidatePicker>,
}

impl ReviewService {
    /// Create a service that draws replacement reviewers uniformly at random
    pub fn new(db: DatabaseConnection) -> Self {
        Self::with_picker(db, Arc::new(UniformPicker))
    }

    /// Create a service with a custom replacement draw
    pub fn with_picker(db: DatabaseConnection, picker: Arc<dyn CandidatePicker>) -> Self {
        Self { db, picker }
    }

    /// Underlying storage handle
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl std::fmt::Debug for ReviewService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewService")
            .field("backend", &self.db.get_database_backend())
            .finish_non_exhaustive()
    }
}

/// Reviewer ids of a pull request in slot order
async fn reviewer_ids<C>(conn: &C, pull_request_id: &str) -> Result<Vec<String>, DbErr>
where
    C: ConnectionTrait,
{
    let slots = pull_request_reviewer::Entity::find()
        .filter(pull_request_reviewer::Column::PullRequestId.eq(pull_request_id))
        .order_by_asc(pull_request_reviewer::Column::Slot)
        .all(conn)
        .await?;

    Ok(slots.into_iter().map(|s| s.user_id).collect())
}

/// `SELECT pull_request_id FROM pull_request_reviewers WHERE user_id IN (..)`
fn reviewed_by(user_ids: Vec<String>) -> SelectStatement {
    Query::select()
        .column(pull_request_reviewer::Column::PullRequestId)
        .from(pull_request_reviewer::Entity)
        .and_where(pull_request_reviewer::Column::UserId.is_in(user_ids))
        .to_owned()
}

/// Drop the given users from the reviewer set of every non-merged pull
/// request. Merged pull requests keep their history.
///
/// The affected pull request rows are locked first, in id order, so the
/// cleanup waits for any reassignment or merge holding them and skips rows
/// that became MERGED meanwhile.
async fn remove_from_open_reviews<C>(conn: &C, user_ids: Vec<String>) -> Result<u64, DbErr>
where
    C: ConnectionTrait,
{
    if user_ids.is_empty() {
        return Ok(0);
    }

    let locked: Vec<String> = pull_request::Entity::find()
        .select_only()
        .column(pull_request::Column::Id)
        .filter(pull_request::Column::Status.ne(pull_request::PullRequestStatus::Merged))
        .filter(pull_request::Column::Id.in_subquery(reviewed_by(user_ids.clone())))
        .order_by_asc(pull_request::Column::Id)
        .lock_exclusive()
        .into_tuple()
        .all(conn)
        .await?;

    if locked.is_empty() {
        return Ok(0);
    }

    let result = pull_request_reviewer::Entity::delete_many()
        .filter(pull_request_reviewer::Column::UserId.is_in(user_ids))
        .filter(pull_request_reviewer::Column::PullRequestId.is_in(locked))
        .exec(conn)
        .await?;

    Ok(result.rows_affected)
}
