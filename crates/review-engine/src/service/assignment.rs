use chrono::Utc;
use review_db::entities::{
    pull_request::{self, PullRequestStatus},
    pull_request_reviewer::{self, MAX_REVIEWERS},
    user,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use tracing::{debug, info};

use super::{reviewer_ids, ReviewService};
use crate::error::{is_unique_violation, ReviewError, ReviewResult};
use crate::model::{PullRequest, PullRequestShort};
use crate::requests::NewPullRequest;

impl ReviewService {
    /// Open a pull request and assign its initial reviewers.
    ///
    /// Reviewers are the first two active members of the author's team in
    /// ascending id order, excluding the author. Fewer are assigned when
    /// the team is smaller. Candidate rows are share-locked, so a reviewer
    /// whose deactivation is in flight is read after it commits.
    pub async fn create_pull_request(&self, new_pr: NewPullRequest) -> ReviewResult<PullRequest> {
        let txn = self.db.begin().await?;

        if pull_request::Entity::find_by_id(new_pr.id.as_str())
            .one(&txn)
            .await?
            .is_some()
        {
            return Err(ReviewError::PrExists);
        }

        let author = user::Entity::find_by_id(new_pr.author_id.as_str())
            .one(&txn)
            .await?
            .ok_or(ReviewError::NotFound("author or team"))?;

        let reviewers: Vec<String> = user::Entity::find()
            .filter(user::Column::TeamName.eq(author.team_name.as_str()))
            .filter(user::Column::Id.ne(author.id.as_str()))
            .filter(user::Column::IsActive.eq(true))
            .order_by_asc(user::Column::Id)
            .limit(MAX_REVIEWERS as u64)
            .lock_shared()
            .all(&txn)
            .await?
            .into_iter()
            .map(|u| u.id)
            .collect();

        // A concurrent insert of the same id loses on the primary key
        let created = pull_request::ActiveModel {
            id: Set(new_pr.id),
            name: Set(new_pr.name),
            author_id: Set(author.id),
            status: Set(PullRequestStatus::Open),
            created_at: Set(Utc::now()),
            merged_at: Set(None),
        }
        .insert(&txn)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ReviewError::PrExists
            } else {
                ReviewError::Database(e)
            }
        })?;

        for (slot, reviewer) in reviewers.iter().enumerate() {
            pull_request_reviewer::ActiveModel {
                pull_request_id: Set(created.id.clone()),
                slot: Set(slot as i32),
                user_id: Set(reviewer.clone()),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        info!(
            pull_request = %created.id,
            author = %created.author_id,
            reviewers = ?reviewers,
            "Created pull request"
        );

        Ok(PullRequest::from_model(created, reviewers))
    }

    /// Mark a pull request as merged.
    ///
    /// Merging an already merged pull request returns it unchanged, so the
    /// merge timestamp is written exactly once.
    pub async fn merge_pull_request(&self, pull_request_id: &str) -> ReviewResult<PullRequest> {
        let txn = self.db.begin().await?;

        let existing = pull_request::Entity::find_by_id(pull_request_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(ReviewError::NotFound("pull request"))?;

        let merged = if existing.status == PullRequestStatus::Merged {
            debug!("Pull request {} already merged", pull_request_id);
            existing
        } else {
            let mut active: pull_request::ActiveModel = existing.into();
            active.status = Set(PullRequestStatus::Merged);
            active.merged_at = Set(Some(Utc::now()));
            let updated = active.update(&txn).await?;
            info!(pull_request = %updated.id, "Merged pull request");
            updated
        };

        let reviewers = reviewer_ids(&txn, &merged.id).await?;
        txn.commit().await?;

        Ok(PullRequest::from_model(merged, reviewers))
    }

    /// Pull requests (any status) that list the user as a current reviewer,
    /// ordered by pull request id. Unknown users yield an empty list.
    pub async fn get_user_reviews(&self, user_id: &str) -> ReviewResult<Vec<PullRequestShort>> {
        debug!("Listing reviews for user: {}", user_id);

        let pull_requests = pull_request::Entity::find()
            .inner_join(pull_request_reviewer::Entity)
            .filter(pull_request_reviewer::Column::UserId.eq(user_id))
            .order_by_asc(pull_request::Column::Id)
            .all(&self.db)
            .await?;

        Ok(pull_requests
            .into_iter()
            .map(PullRequestShort::from)
            .collect())
    }
}

