use review_db::entities::{pull_request, pull_request_reviewer};
use sea_orm::{
    sea_query::{Expr, SimpleExpr},
    EntityTrait, FromQueryResult, QueryOrder, QuerySelect,
};
use tracing::debug;

use super::ReviewService;
use crate::error::ReviewResult;
use crate::model::{AssignmentStats, PrAssignmentStat, UserAssignmentStat};

#[derive(Debug, FromQueryResult)]
struct UserCountRow {
    user_id: String,
    assignments: i64,
}

#[derive(Debug, FromQueryResult)]
struct PullRequestCountRow {
    id: String,
    assignments: i64,
}

impl ReviewService {
    /// Current reviewer counts per user and per pull request.
    ///
    /// Merged pull requests are included. Users with no assignment are
    /// omitted; pull requests with no reviewers appear with zero. Both
    /// lists are ordered by id.
    pub async fn assignment_stats(&self) -> ReviewResult<AssignmentStats> {
        let by_user: Vec<UserCountRow> = pull_request_reviewer::Entity::find()
            .select_only()
            .column(pull_request_reviewer::Column::UserId)
            .column_as(reviewer_count(), "assignments")
            .group_by(pull_request_reviewer::Column::UserId)
            .order_by_asc(pull_request_reviewer::Column::UserId)
            .into_model::<UserCountRow>()
            .all(&self.db)
            .await?;

        let by_pr: Vec<PullRequestCountRow> = pull_request::Entity::find()
            .select_only()
            .column(pull_request::Column::Id)
            .column_as(reviewer_count(), "assignments")
            .left_join(pull_request_reviewer::Entity)
            .group_by(pull_request::Column::Id)
            .order_by_asc(pull_request::Column::Id)
            .into_model::<PullRequestCountRow>()
            .all(&self.db)
            .await?;

        debug!(
            "Assignment stats: {} users, {} pull requests",
            by_user.len(),
            by_pr.len()
        );

        Ok(AssignmentStats {
            by_user: by_user
                .into_iter()
                .map(|row| UserAssignmentStat {
                    user_id: row.user_id,
                    assignments: count(row.assignments),
                })
                .collect(),
            by_pr: by_pr
                .into_iter()
                .map(|row| PrAssignmentStat {
                    pull_request_id: row.id,
                    assignments: count(row.assignments),
                })
                .collect(),
        })
    }
}

/// `COUNT(pull_request_reviewers.user_id)`, which skips the NULLs of a left join
fn reviewer_count() -> SimpleExpr {
    Expr::col((
        pull_request_reviewer::Entity,
        pull_request_reviewer::Column::UserId,
    ))
    .count()
}

fn count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}
