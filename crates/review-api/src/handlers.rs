use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use review_engine::{
    AssignmentStats, CreatePullRequestRequest, CreateTeamRequest, DeactivateTeamRequest,
    MergePullRequestRequest, ReassignReviewerRequest, SetIsActiveRequest, Team, TeamQuery,
    UserReviewsQuery,
};
use std::sync::Arc;
use tracing::debug;

use crate::error::{review_error, validation_error, ApiError};
use crate::models::*;
use crate::AppState;

/// Create a team with its members
#[utoipa::path(
    post,
    path = "/team/add",
    request_body = CreateTeamRequest,
    responses(
        (status = 201, description = "Team created", body = TeamResponse),
        (status = 400, description = "Team already exists or invalid request", body = ErrorResponse),
        (status = 409, description = "A member belongs to another team", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "teams"
)]
pub async fn create_team(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTeamRequest>,
) -> Result<(StatusCode, Json<TeamResponse>), ApiError> {
    let new_team = req.validate().map_err(validation_error)?;
    let team = state
        .service
        .create_team(new_team)
        .await
        .map_err(review_error)?;

    Ok((StatusCode::CREATED, Json(TeamResponse { team })))
}

/// Get a team and its members
#[utoipa::path(
    get,
    path = "/team/get",
    params(TeamQuery),
    responses(
        (status = 200, description = "Team with members", body = Team),
        (status = 400, description = "Missing team_name", body = ErrorResponse),
        (status = 404, description = "Team not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "teams"
)]
pub async fn get_team(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TeamQuery>,
) -> Result<Json<Team>, ApiError> {
    query.validate().map_err(validation_error)?;
    debug!("Getting team: {}", query.team_name);

    let team = state
        .service
        .get_team(&query.team_name)
        .await
        .map_err(review_error)?;

    Ok(Json(team))
}

/// Deactivate every member of a team and drop them from open pull requests
#[utoipa::path(
    post,
    path = "/team/deactivateMembers",
    request_body = DeactivateTeamRequest,
    responses(
        (status = 200, description = "Team with all members inactive", body = TeamResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Team not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "teams"
)]
pub async fn deactivate_team_members(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DeactivateTeamRequest>,
) -> Result<Json<TeamResponse>, ApiError> {
    req.validate().map_err(validation_error)?;

    let team = state
        .service
        .deactivate_team_members(&req.team_name)
        .await
        .map_err(review_error)?;

    Ok(Json(TeamResponse { team }))
}

/// Set a user's active flag
#[utoipa::path(
    post,
    path = "/users/setIsActive",
    request_body = SetIsActiveRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn set_user_active(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SetIsActiveRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    req.validate().map_err(validation_error)?;

    let user = state
        .service
        .set_user_active(&req.user_id, req.is_active)
        .await
        .map_err(review_error)?;

    Ok(Json(UserResponse { user }))
}

/// Pull requests the user currently reviews
#[utoipa::path(
    get,
    path = "/users/getReview",
    params(UserReviewsQuery),
    responses(
        (status = 200, description = "Pull requests under review", body = UserReviewsResponse),
        (status = 400, description = "Missing user_id", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn get_user_reviews(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserReviewsQuery>,
) -> Result<Json<UserReviewsResponse>, ApiError> {
    query.validate().map_err(validation_error)?;

    let pull_requests = state
        .service
        .get_user_reviews(&query.user_id)
        .await
        .map_err(review_error)?;

    Ok(Json(UserReviewsResponse {
        user_id: query.user_id,
        pull_requests,
    }))
}

/// Open a pull request and assign reviewers
#[utoipa::path(
    post,
    path = "/pullRequest/create",
    request_body = CreatePullRequestRequest,
    responses(
        (status = 201, description = "Pull request created", body = PullRequestResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Author not found", body = ErrorResponse),
        (status = 409, description = "Pull request already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "pull-requests"
)]
pub async fn create_pull_request(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreatePullRequestRequest>,
) -> Result<(StatusCode, Json<PullRequestResponse>), ApiError> {
    let new_pr = req.validate().map_err(validation_error)?;
    let pr = state
        .service
        .create_pull_request(new_pr)
        .await
        .map_err(review_error)?;

    Ok((StatusCode::CREATED, Json(PullRequestResponse { pr })))
}

/// Merge a pull request (idempotent)
#[utoipa::path(
    post,
    path = "/pullRequest/merge",
    request_body = MergePullRequestRequest,
    responses(
        (status = 200, description = "Merged pull request", body = PullRequestResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Pull request not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "pull-requests"
)]
pub async fn merge_pull_request(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MergePullRequestRequest>,
) -> Result<Json<PullRequestResponse>, ApiError> {
    req.validate().map_err(validation_error)?;

    let pr = state
        .service
        .merge_pull_request(&req.pull_request_id)
        .await
        .map_err(review_error)?;

    Ok(Json(PullRequestResponse { pr }))
}

/// Replace one reviewer with a random eligible teammate
#[utoipa::path(
    post,
    path = "/pullRequest/reassign",
    request_body = ReassignReviewerRequest,
    responses(
        (status = 200, description = "Reviewer replaced", body = ReassignResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Pull request or user not found", body = ErrorResponse),
        (status = 409, description = "Merged, not assigned, or no candidate", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "pull-requests"
)]
pub async fn reassign_reviewer(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ReassignReviewerRequest>,
) -> Result<Json<ReassignResponse>, ApiError> {
    req.validate().map_err(validation_error)?;

    let reassignment = state
        .service
        .reassign_reviewer(&req.pull_request_id, &req.old_user_id)
        .await
        .map_err(review_error)?;

    Ok(Json(ReassignResponse {
        pr: reassignment.pull_request,
        replaced_by: reassignment.replaced_by,
    }))
}

/// Current reviewer counts per user and per pull request
#[utoipa::path(
    get,
    path = "/stats/assignments",
    responses(
        (status = 200, description = "Assignment statistics", body = AssignmentStats),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "stats"
)]
pub async fn assignment_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<AssignmentStats>, ApiError> {
    debug!("Computing assignment stats");

    let stats = state
        .service
        .assignment_stats()
        .await
        .map_err(review_error)?;

    Ok(Json(stats))
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "system"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
