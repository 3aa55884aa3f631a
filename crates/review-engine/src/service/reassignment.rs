use review_db::entities::{
    pull_request::{self, PullRequestStatus},
    pull_request_reviewer, user,
};
use sea_orm::{
    sea_query::Expr, ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait,
};
use tracing::info;

use super::{reviewer_ids, ReviewService};
use crate::error::{ReviewError, ReviewResult};
use crate::model::{PullRequest, Reassignment};

impl ReviewService {
    /// Replace `old_user_id` on an open pull request with a random eligible
    /// teammate of the old reviewer.
    ///
    /// The pull request row stays locked from the first read until commit,
    /// so reassignments, merges and deactivation cleanup on the same pull
    /// request are serialised. Preconditions are checked in this order:
    /// pull request exists, is OPEN, lists `old_user_id`, and
    /// `old_user_id` exists. Eligible replacements are active, not the
    /// author, and not already assigned; they are share-locked so a
    /// concurrent deactivation commits first and is then observed. The old
    /// reviewer's slot is overwritten in place.
    pub async fn reassign_reviewer(
        &self,
        pull_request_id: &str,
        old_user_id: &str,
    ) -> ReviewResult<Reassignment> {
        let txn = self.db.begin().await?;

        let pr = pull_request::Entity::find_by_id(pull_request_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(ReviewError::NotFound("pull request"))?;

        if pr.status == PullRequestStatus::Merged {
            return Err(ReviewError::PrMerged);
        }

        let assigned = reviewer_ids(&txn, &pr.id).await?;
        if !assigned.iter().any(|id| id == old_user_id) {
            return Err(ReviewError::NotAssigned);
        }

        let old_reviewer = user::Entity::find_by_id(old_user_id)
            .one(&txn)
            .await?
            .ok_or(ReviewError::NotFound("user"))?;

        // `assigned` contains the old reviewer, so it is excluded here too
        let candidates: Vec<String> = user::Entity::find()
            .select_only()
            .column(user::Column::Id)
            .filter(user::Column::TeamName.eq(old_reviewer.team_name.as_str()))
            .filter(user::Column::IsActive.eq(true))
            .filter(user::Column::Id.ne(pr.author_id.as_str()))
            .filter(user::Column::Id.is_not_in(assigned.clone()))
            .order_by_asc(user::Column::Id)
            .lock_shared()
            .into_tuple()
            .all(&txn)
            .await?;

        if candidates.is_empty() {
            return Err(ReviewError::NoCandidate);
        }

        let replacement = candidates
            .get(self.picker.pick(candidates.len()))
            .cloned()
            .ok_or(ReviewError::NoCandidate)?;

        let updated = pull_request_reviewer::Entity::update_many()
            .col_expr(
                pull_request_reviewer::Column::UserId,
                Expr::value(replacement.clone()),
            )
            .filter(pull_request_reviewer::Column::PullRequestId.eq(pr.id.as_str()))
            .filter(pull_request_reviewer::Column::UserId.eq(old_user_id))
            .exec(&txn)
            .await?;

        // Exactly one slot holds the old reviewer while the row is locked
        if updated.rows_affected != 1 {
            return Err(ReviewError::Database(DbErr::RecordNotUpdated));
        }

        txn.commit().await?;

        info!(
            pull_request = %pr.id,
            old_reviewer = %old_user_id,
            new_reviewer = %replacement,
            "Reassigned reviewer"
        );

        let reviewers = replace_reviewer(&assigned, old_user_id, &replacement);
        Ok(Reassignment {
            pull_request: PullRequest::from_model(pr, reviewers),
            replaced_by: replacement,
        })
    }
}

/// Swap `old` for `new`, keeping every other reviewer in its position
fn replace_reviewer(assigned: &[String], old: &str, new: &str) -> Vec<String> {
    assigned
        .iter()
        .map(|id| {
            if id == old {
                new.to_string()
            } else {
                id.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_replace_first_slot_keeps_second() {
        let result = replace_reviewer(&ids(&["u2", "u3"]), "u2", "u4");
        assert_eq!(result, ids(&["u4", "u3"]));
    }

    #[test]
    fn test_replace_second_slot_keeps_first() {
        let result = replace_reviewer(&ids(&["u2", "u3"]), "u3", "u4");
        assert_eq!(result, ids(&["u2", "u4"]));
    }

    #[test]
    fn test_replace_single_reviewer() {
        let result = replace_reviewer(&ids(&["u2"]), "u2", "u5");
        assert_eq!(result, ids(&["u5"]));
    }
}
