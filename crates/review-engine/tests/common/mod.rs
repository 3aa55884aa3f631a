//! Shared fixtures for engine integration tests
#![allow(dead_code)]

use std::sync::Arc;

use mockall::mock;
use review_engine::{
    CandidatePicker, CreatePullRequestRequest, CreateTeamRequest, PullRequest, ReviewService,
    Team, TeamMemberInput,
};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

mock! {
    pub Picker {}

    impl CandidatePicker for Picker {
        fn pick(&self, eligible: usize) -> usize;
    }
}

/// Fresh in-memory database with the schema applied. A single pooled
/// connection keeps every handle on the same database.
pub async fn setup_test_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(opts)
        .await
        .expect("Failed to connect to in-memory database");

    review_db::migrate(&db)
        .await
        .expect("Failed to run migrations");

    db
}

pub async fn setup_service() -> ReviewService {
    ReviewService::new(setup_test_db().await)
}

pub async fn setup_service_with_picker(picker: MockPicker) -> ReviewService {
    ReviewService::with_picker(setup_test_db().await, Arc::new(picker))
}

/// Picker that always returns `index`, whatever the candidate count
pub fn fixed_picker(index: usize) -> MockPicker {
    let mut picker = MockPicker::new();
    picker.expect_pick().returning(move |_| index);
    picker
}

pub fn member(user_id: &str, is_active: bool) -> TeamMemberInput {
    TeamMemberInput {
        user_id: user_id.to_string(),
        username: format!("User {}", user_id),
        is_active,
    }
}

pub async fn create_team(service: &ReviewService, name: &str, members: &[(&str, bool)]) -> Team {
    let request = CreateTeamRequest {
        team_name: name.to_string(),
        members: members
            .iter()
            .map(|(id, active)| member(id, *active))
            .collect(),
    };

    service
        .create_team(request.validate().expect("valid team request"))
        .await
        .expect("Failed to create team")
}

pub async fn create_pr(service: &ReviewService, id: &str, author_id: &str) -> PullRequest {
    let request = CreatePullRequestRequest {
        pull_request_id: id.to_string(),
        pull_request_name: format!("PR {}", id),
        author_id: author_id.to_string(),
    };

    service
        .create_pull_request(request.validate().expect("valid pull request"))
        .await
        .expect("Failed to create pull request")
}

pub fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Team "backend" with active members u1..u4
pub async fn seed_backend(service: &ReviewService) -> Team {
    create_team(
        service,
        "backend",
        &[("u1", true), ("u2", true), ("u3", true), ("u4", true)],
    )
    .await
}
