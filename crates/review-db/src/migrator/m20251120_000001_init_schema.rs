//! Initial schema: teams, users, pull requests and reviewer slots

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ============================================================
        // 1. Create teams table
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Team::Table)
                    .if_not_exists()
                    .col(string_len(Team::Name, 255).primary_key())
                    .col(
                        timestamp_with_time_zone(Team::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // 2. Create users table
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(string_len(User::Id, 255).primary_key())
                    .col(string_len(User::Name, 255).not_null())
                    .col(string_len(User::TeamName, 255).not_null())
                    .col(boolean(User::IsActive).not_null().default(true))
                    .col(
                        timestamp_with_time_zone(User::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_users_team_name")
                            .from(User::Table, User::TeamName)
                            .to(Team::Table, Team::Name)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_team_name")
                    .table(User::Table)
                    .col(User::TeamName)
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // 3. Create pull_requests table
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(PullRequest::Table)
                    .if_not_exists()
                    .col(string_len(PullRequest::Id, 255).primary_key())
                    .col(string_len(PullRequest::Name, 255).not_null())
                    .col(string_len(PullRequest::AuthorId, 255).not_null())
                    .col(
                        string_len(PullRequest::Status, 16)
                            .not_null()
                            .default("OPEN")
                            .check(Expr::col(PullRequest::Status).is_in(["OPEN", "MERGED"])),
                    )
                    .col(
                        timestamp_with_time_zone(PullRequest::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(PullRequest::MergedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pull_requests_author_id")
                            .from(PullRequest::Table, PullRequest::AuthorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // 4. Create pull_request_reviewers table
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(PullRequestReviewer::Table)
                    .if_not_exists()
                    .col(string_len(PullRequestReviewer::PullRequestId, 255).not_null())
                    .col(
                        integer(PullRequestReviewer::Slot)
                            .not_null()
                            .check(Expr::col(PullRequestReviewer::Slot).between(0, 1)),
                    )
                    .col(string_len(PullRequestReviewer::UserId, 255).not_null())
                    .primary_key(
                        Index::create()
                            .col(PullRequestReviewer::PullRequestId)
                            .col(PullRequestReviewer::Slot),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pull_request_reviewers_pull_request_id")
                            .from(
                                PullRequestReviewer::Table,
                                PullRequestReviewer::PullRequestId,
                            )
                            .to(PullRequest::Table, PullRequest::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pull_request_reviewers_user_id")
                            .from(PullRequestReviewer::Table, PullRequestReviewer::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_pull_request_reviewers_pr_user")
                    .table(PullRequestReviewer::Table)
                    .col(PullRequestReviewer::PullRequestId)
                    .col(PullRequestReviewer::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PullRequestReviewer::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PullRequest::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Team::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Team {
    #[sea_orm(iden = "teams")]
    Table,
    Name,
    CreatedAt,
}

#[derive(DeriveIden)]
enum User {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Name,
    TeamName,
    IsActive,
    CreatedAt,
}

#[derive(DeriveIden)]
enum PullRequest {
    #[sea_orm(iden = "pull_requests")]
    Table,
    Id,
    Name,
    AuthorId,
    Status,
    CreatedAt,
    MergedAt,
}

#[derive(DeriveIden)]
enum PullRequestReviewer {
    #[sea_orm(iden = "pull_request_reviewers")]
    Table,
    PullRequestId,
    Slot,
    UserId,
}
