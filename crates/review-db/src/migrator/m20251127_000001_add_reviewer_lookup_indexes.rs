//! Indexes for reviewer lookups and open-PR cleanup
//! Speeds up "PRs reviewed by user" queries and the deactivation cascade,
//! which filters on reviewer id and PR status.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_pull_request_reviewers_user_id")
                    .table(PullRequestReviewers::Table)
                    .col(PullRequestReviewers::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_pull_requests_status")
                    .table(PullRequests::Table)
                    .col(PullRequests::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_pull_requests_status")
                    .table(PullRequests::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_pull_request_reviewers_user_id")
                    .table(PullRequestReviewers::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum PullRequestReviewers {
    Table,
    UserId,
}

#[derive(DeriveIden)]
enum PullRequests {
    Table,
    Status,
}
