//! Pull request creation, merge and review listings

mod common;

use common::*;
use review_engine::{
    ErrorCode, NewPullRequest, PullRequestShort, PullRequestStatus, ReviewError,
};

#[tokio::test]
async fn test_first_two_active_teammates_assigned() {
    let service = setup_service().await;
    seed_backend(&service).await;

    let pr = create_pr(&service, "pr-1", "u1").await;

    assert_eq!(pr.pull_request_id, "pr-1");
    assert_eq!(pr.pull_request_name, "PR pr-1");
    assert_eq!(pr.author_id, "u1");
    assert_eq!(pr.status, PullRequestStatus::Open);
    assert_eq!(pr.assigned_reviewers, ids(&["u2", "u3"]));
    assert!(pr.merged_at.is_none());
}

#[tokio::test]
async fn test_assignment_is_deterministic_for_other_author() {
    let service = setup_service().await;
    seed_backend(&service).await;

    let pr = create_pr(&service, "pr-1", "u3").await;
    assert_eq!(pr.assigned_reviewers, ids(&["u1", "u2"]));
}

#[tokio::test]
async fn test_inactive_members_skipped() {
    let service = setup_service().await;
    create_team(
        &service,
        "backend",
        &[("u1", true), ("u2", false), ("u3", true), ("u4", true)],
    )
    .await;

    let pr = create_pr(&service, "pr-1", "u1").await;
    assert_eq!(pr.assigned_reviewers, ids(&["u3", "u4"]));
}

#[tokio::test]
async fn test_small_teams_get_fewer_reviewers() {
    let service = setup_service().await;
    create_team(&service, "pair", &[("a", true), ("b", true)]).await;
    create_team(&service, "solo", &[("s", true)]).await;

    let pr = create_pr(&service, "pr-pair", "a").await;
    assert_eq!(pr.assigned_reviewers, ids(&["b"]));

    let pr = create_pr(&service, "pr-solo", "s").await;
    assert!(pr.assigned_reviewers.is_empty());
}

#[tokio::test]
async fn test_inactive_author_can_open_pull_request() {
    let service = setup_service().await;
    create_team(&service, "backend", &[("u1", false), ("u2", true)]).await;

    let pr = create_pr(&service, "pr-1", "u1").await;
    assert_eq!(pr.assigned_reviewers, ids(&["u2"]));
}

#[tokio::test]
async fn test_duplicate_pull_request_rejected() {
    let service = setup_service().await;
    seed_backend(&service).await;
    create_pr(&service, "pr-1", "u1").await;

    let err = service
        .create_pull_request(NewPullRequest {
            id: "pr-1".to_string(),
            name: "Again".to_string(),
            author_id: "u4".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ReviewError::PrExists));
    assert_eq!(err.to_string(), "PR id already exists");
}

#[tokio::test]
async fn test_unknown_author_rejected() {
    let service = setup_service().await;

    let err = service
        .create_pull_request(NewPullRequest {
            id: "pr-1".to_string(),
            name: "Orphan".to_string(),
            author_id: "ghost".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.code(), Some(ErrorCode::NotFound));
    assert_eq!(err.to_string(), "author or team not found");
}

#[tokio::test]
async fn test_merge_sets_status_and_timestamp() {
    let service = setup_service().await;
    seed_backend(&service).await;
    let created = create_pr(&service, "pr-1", "u1").await;

    let merged = service.merge_pull_request("pr-1").await.unwrap();

    assert!(merged.is_merged());
    assert_eq!(merged.assigned_reviewers, created.assigned_reviewers);
    assert_eq!(merged.created_at, created.created_at);
    let merged_at = merged.merged_at.expect("merge time recorded");
    assert!(merged_at >= merged.created_at);
}

#[tokio::test]
async fn test_merge_is_idempotent() {
    let service = setup_service().await;
    seed_backend(&service).await;
    create_pr(&service, "pr-1", "u1").await;

    let first = service.merge_pull_request("pr-1").await.unwrap();
    let second = service.merge_pull_request("pr-1").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.merged_at, second.merged_at);
}

#[tokio::test]
async fn test_merge_unknown_pull_request() {
    let service = setup_service().await;

    let err = service.merge_pull_request("missing").await.unwrap_err();
    assert!(matches!(err, ReviewError::NotFound("pull request")));
}

#[tokio::test]
async fn test_user_reviews_listed_by_id_including_merged() {
    let service = setup_service().await;
    seed_backend(&service).await;
    create_pr(&service, "pr-b", "u1").await;
    create_pr(&service, "pr-a", "u4").await;
    create_pr(&service, "pr-c", "u2").await;
    service.merge_pull_request("pr-b").await.unwrap();

    // u2 reviews pr-a (u4 -> [u1,u2]) and pr-b (u1 -> [u2,u3])
    let reviews = service.get_user_reviews("u2").await.unwrap();
    assert_eq!(
        reviews,
        vec![
            PullRequestShort {
                pull_request_id: "pr-a".to_string(),
                pull_request_name: "PR pr-a".to_string(),
                author_id: "u4".to_string(),
                status: PullRequestStatus::Open,
            },
            PullRequestShort {
                pull_request_id: "pr-b".to_string(),
                pull_request_name: "PR pr-b".to_string(),
                author_id: "u1".to_string(),
                status: PullRequestStatus::Merged,
            },
        ]
    );
}

#[tokio::test]
async fn test_unknown_user_has_no_reviews() {
    let service = setup_service().await;

    let reviews = service.get_user_reviews("nobody").await.unwrap();
    assert!(reviews.is_empty());
}
