//! User activity changes and team-wide deactivation

mod common;

use common::*;
use review_engine::{ErrorCode, ReviewError};

#[tokio::test]
async fn test_set_inactive_returns_user() {
    let service = setup_service().await;
    seed_backend(&service).await;

    let user = service.set_user_active("u2", false).await.unwrap();

    assert_eq!(user.user_id, "u2");
    assert_eq!(user.username, "User u2");
    assert_eq!(user.team_name, "backend");
    assert!(!user.is_active);
}

#[tokio::test]
async fn test_deactivation_drops_open_reviews_only() {
    let service = setup_service().await;
    seed_backend(&service).await;
    create_pr(&service, "pr-open", "u1").await;
    create_pr(&service, "pr-merged", "u1").await;
    service.merge_pull_request("pr-merged").await.unwrap();

    service.set_user_active("u2", false).await.unwrap();

    let reviews = service.get_user_reviews("u2").await.unwrap();
    let ids: Vec<_> = reviews.iter().map(|r| r.pull_request_id.as_str()).collect();
    assert_eq!(ids, vec!["pr-merged"]);

    let merged = service.merge_pull_request("pr-merged").await.unwrap();
    assert_eq!(merged.assigned_reviewers, common::ids(&["u2", "u3"]));
    let open = service.merge_pull_request("pr-open").await.unwrap();
    assert_eq!(open.assigned_reviewers, common::ids(&["u3"]));
}

#[tokio::test]
async fn test_inactive_user_not_assigned_to_new_pull_requests() {
    let service = setup_service().await;
    seed_backend(&service).await;
    service.set_user_active("u2", false).await.unwrap();

    let pr = create_pr(&service, "pr-1", "u1").await;
    assert_eq!(pr.assigned_reviewers, common::ids(&["u3", "u4"]));
}

#[tokio::test]
async fn test_reactivation_does_not_restore_reviews() {
    let service = setup_service().await;
    seed_backend(&service).await;
    create_pr(&service, "pr-1", "u1").await;

    service.set_user_active("u2", false).await.unwrap();
    let user = service.set_user_active("u2", true).await.unwrap();

    assert!(user.is_active);
    assert!(service.get_user_reviews("u2").await.unwrap().is_empty());

    // Back in the pool for new pull requests
    let pr = create_pr(&service, "pr-2", "u1").await;
    assert_eq!(pr.assigned_reviewers, common::ids(&["u2", "u3"]));
}

#[tokio::test]
async fn test_activate_keeps_existing_reviews() {
    let service = setup_service().await;
    seed_backend(&service).await;
    create_pr(&service, "pr-1", "u1").await;

    service.set_user_active("u2", true).await.unwrap();
    assert_eq!(service.get_user_reviews("u2").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_set_active_unknown_user() {
    let service = setup_service().await;

    let err = service.set_user_active("ghost", false).await.unwrap_err();
    assert!(matches!(err, ReviewError::NotFound("user")));
}

#[tokio::test]
async fn test_deactivate_team_members() {
    let service = setup_service().await;
    seed_backend(&service).await;
    create_team(&service, "frontend", &[("f1", true), ("f2", true), ("f3", true)]).await;
    create_pr(&service, "pr-back", "u1").await;
    create_pr(&service, "pr-front", "f1").await;
    create_pr(&service, "pr-done", "u4").await;
    service.merge_pull_request("pr-done").await.unwrap();

    let team = service.deactivate_team_members("backend").await.unwrap();

    assert_eq!(team.team_name, "backend");
    assert_eq!(team.members.len(), 4);
    assert!(team.members.iter().all(|m| !m.is_active));
    assert_eq!(team, service.get_team("backend").await.unwrap());

    let open = service.merge_pull_request("pr-back").await.unwrap();
    assert!(open.assigned_reviewers.is_empty());

    // Merged history and other teams are untouched
    let done = service.merge_pull_request("pr-done").await.unwrap();
    assert_eq!(done.assigned_reviewers, common::ids(&["u1", "u2"]));
    let front = service.merge_pull_request("pr-front").await.unwrap();
    assert_eq!(front.assigned_reviewers, common::ids(&["f2", "f3"]));
    assert!(service
        .get_team("frontend")
        .await
        .unwrap()
        .members
        .iter()
        .all(|m| m.is_active));
}

#[tokio::test]
async fn test_reviews_after_team_deactivation() {
    let service = setup_service().await;
    seed_backend(&service).await;
    create_pr(&service, "pr-1", "u1").await;
    create_pr(&service, "pr-2", "u4").await;
    service.merge_pull_request("pr-2").await.unwrap();

    service.deactivate_team_members("backend").await.unwrap();

    // pr-1 had [u2,u3]; merged pr-2 keeps [u1,u2]
    for user in ["u3", "u4"] {
        assert!(service.get_user_reviews(user).await.unwrap().is_empty());
    }
    for user in ["u1", "u2"] {
        let reviews = service.get_user_reviews(user).await.unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].pull_request_id, "pr-2");
    }
}

#[tokio::test]
async fn test_deactivate_empty_team() {
    let service = setup_service().await;
    create_team(&service, "empty", &[]).await;

    let team = service.deactivate_team_members("empty").await.unwrap();
    assert!(team.members.is_empty());
}

#[tokio::test]
async fn test_deactivate_unknown_team() {
    let service = setup_service().await;

    let err = service.deactivate_team_members("nope").await.unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::NotFound));
}

#[tokio::test]
async fn test_reassign_after_deactivation() {
    let service = setup_service_with_picker(fixed_picker(0)).await;
    seed_backend(&service).await;
    create_pr(&service, "pr-1", "u1").await;

    // u4 leaves; replacing u2 now has no candidate
    service.set_user_active("u4", false).await.unwrap();
    let err = service.reassign_reviewer("pr-1", "u2").await.unwrap_err();
    assert!(matches!(err, ReviewError::NoCandidate));

    // u2 leaves; it is no longer assigned
    service.set_user_active("u2", false).await.unwrap();
    let err = service.reassign_reviewer("pr-1", "u2").await.unwrap_err();
    assert!(matches!(err, ReviewError::NotAssigned));
}
