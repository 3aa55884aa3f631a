pub mod error;
pub mod handlers;
pub mod models;

use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use review_engine::ReviewService;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across handlers
pub struct AppState {
    pub service: ReviewService,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Review Assigner API",
        version = "0.1.0",
        description = "Assigns and reassigns pull request reviewers within teams",
        contact(
            name = "Review Assigner Team",
            email = "team@review-assigner.dev"
        )
    ),
    paths(
        handlers::create_team,
        handlers::get_team,
        handlers::deactivate_team_members,
        handlers::set_user_active,
        handlers::get_user_reviews,
        handlers::create_pull_request,
        handlers::merge_pull_request,
        handlers::reassign_reviewer,
        handlers::assignment_stats,
        handlers::health_check,
    ),
    components(
        schemas(
            review_engine::TeamMember,
            review_engine::Team,
            review_engine::User,
            review_engine::PullRequestStatus,
            review_engine::PullRequest,
            review_engine::PullRequestShort,
            review_engine::UserAssignmentStat,
            review_engine::PrAssignmentStat,
            review_engine::AssignmentStats,
            review_engine::TeamMemberInput,
            review_engine::CreateTeamRequest,
            review_engine::DeactivateTeamRequest,
            review_engine::SetIsActiveRequest,
            review_engine::CreatePullRequestRequest,
            review_engine::MergePullRequestRequest,
            review_engine::ReassignReviewerRequest,
            review_engine::ErrorCode,
            models::TeamResponse,
            models::UserResponse,
            models::PullRequestResponse,
            models::ReassignResponse,
            models::UserReviewsResponse,
            models::HealthResponse,
            models::ErrorBody,
            models::ErrorResponse,
        )
    ),
    tags(
        (name = "teams", description = "Team management endpoints"),
        (name = "users", description = "User activity and review listing endpoints"),
        (name = "pull-requests", description = "Pull request lifecycle and reviewer endpoints"),
        (name = "stats", description = "Assignment statistics endpoints"),
        (name = "system", description = "System health and info endpoints")
    )
)]
struct ApiDoc;

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// Address to bind the API server
    pub bind_addr: SocketAddr,
    /// Enable permissive CORS (for development)
    pub enable_cors: bool,
    /// Upper bound on a single request, including its transaction
    pub request_timeout: Duration,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            enable_cors: false,
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// API Server
pub struct ApiServer {
    config: ApiServerConfig,
    state: Arc<AppState>,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(config: ApiServerConfig, service: ReviewService) -> Self {
        let state = Arc::new(AppState { service });

        Self { config, state }
    }

    /// Build the router with all routes
    pub fn build_router(&self) -> Router {
        let api_doc = ApiDoc::openapi();

        let api_router = Router::new()
            .route("/health", get(handlers::health_check))
            .route("/team/add", post(handlers::create_team))
            .route("/team/get", get(handlers::get_team))
            .route(
                "/team/deactivateMembers",
                post(handlers::deactivate_team_members),
            )
            .route("/users/setIsActive", post(handlers::set_user_active))
            .route("/users/getReview", get(handlers::get_user_reviews))
            .route("/pullRequest/create", post(handlers::create_pull_request))
            .route("/pullRequest/merge", post(handlers::merge_pull_request))
            .route("/pullRequest/reassign", post(handlers::reassign_reviewer))
            .route("/stats/assignments", get(handlers::assignment_stats))
            .with_state(self.state.clone());

        // SwaggerUi also serves /api/openapi.json
        let router = Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api/openapi.json", api_doc))
            .merge(api_router);

        let mut router = router
            .layer(TimeoutLayer::new(self.config.request_timeout))
            .layer(TraceLayer::new_for_http());

        if self.config.enable_cors {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE])
                .allow_origin(Any);
            router = router.layer(cors);
        }

        router
    }

    /// Start the API server and run until SIGINT or SIGTERM
    pub async fn start(self) -> Result<(), anyhow::Error> {
        let router = self.build_router();

        info!("Starting API server on {}", self.config.bind_addr);
        info!(
            "OpenAPI document: http://{}/api/openapi.json",
            self.config.bind_addr
        );
        info!("Swagger UI: http://{}/swagger-ui", self.config.bind_addr);

        let listener = tokio::net::TcpListener::bind(self.config.bind_addr).await?;

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

        info!("API server stopped");
        Ok(())
    }
}

/// Resolves on Ctrl+C, or on SIGTERM where available
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT (Ctrl+C)"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
