use crate::config::Config;
use crate::services::account_service::AccountService;
use crate::services::conversation_service::ConversationService;
use crate::services::health_service::HealthService;
use crate::services::message_service::MessageService;
use axum::body::Body;
use axum::http::Request;
use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tower_governor::GovernorLayer;
use tower_governor::governor::GovernorConfigBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod conversations;
pub mod health;
pub mod messages;
pub mod middleware;
pub mod schemas;

#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Config,
    pub account_service: AccountService,
    pub message_service: MessageService,
    pub conversation_service: ConversationService,
}

#[derive(Clone, Debug)]
pub struct MgmtState {
    pub health_service: HealthService,
}

#[derive(Debug)]
pub struct ServiceContainer {
    pub account_service: AccountService,
    pub message_service: MessageService,
    pub conversation_service: ConversationService,
    pub health_service: HealthService,
}

impl ServiceContainer {
    /// Wires every service against the given pool and presence collaborator.
    #[must_use]
    pub fn build(
        config: &Config,
        pool: crate::storage::DbPool,
        presence: Arc<dyn crate::services::presence::PresenceService>,
    ) -> Self {
        let user_repo = crate::storage::user_repo::UserRepository::new(pool.clone());
        let conversation_repo = crate::storage::conversation_repo::ConversationRepository::new(pool.clone());
        let message_repo = crate::storage::message_repo::MessageRepository::new(pool.clone());

        Self {
            account_service: AccountService::new(
                config.auth.clone(),
                user_repo.clone(),
                Arc::clone(&presence),
            ),
            message_service: MessageService::new(
                conversation_repo.clone(),
                message_repo.clone(),
                user_repo,
                config.chat.clone(),
            ),
            conversation_service: ConversationService::new(
                conversation_repo,
                message_repo,
                presence,
                config.chat.read_receipt_style,
            ),
            health_service: HealthService::new(pool),
        }
    }
}

/// Configures and returns the primary application router.
///
/// # Panics
/// Panics if the rate limiter configuration cannot be constructed.
pub fn app_router(config: Config, services: ServiceContainer) -> Router {
    let std_interval_ns = 1_000_000_000 / config.rate_limit.per_second.max(1);
    let standard_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_nanosecond(u64::from(std_interval_ns))
            .burst_size(config.rate_limit.burst)
            .finish()
            .expect("Failed to build standard rate limiter config"),
    );

    // Auth tier: stricter limits for expensive registration & login
    let auth_interval_ns = 1_000_000_000 / config.rate_limit.auth_per_second.max(1);
    let auth_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_nanosecond(u64::from(auth_interval_ns))
            .burst_size(config.rate_limit.auth_burst)
            .finish()
            .expect("Failed to build auth rate limiter config"),
    );

    let state = AppState {
        config,
        account_service: services.account_service,
        message_service: services.message_service,
        conversation_service: services.conversation_service,
    };

    // Sensitive routes with strict limits
    let auth_routes = Router::new()
        .route("/users", post(auth::register))
        .route("/sessions", post(auth::login))
        .route("/sessions", delete(auth::logout))
        .layer(GovernorLayer::new(auth_conf));

    // Standard routes
    let api_routes = Router::new()
        .route("/conversations", get(conversations::list_conversations))
        .route("/conversations/{conversationId}/sender/{senderId}", put(conversations::mark_read))
        .route("/messages", post(messages::send_message))
        .layer(GovernorLayer::new(standard_conf));

    Router::new()
        .nest("/v1", auth_routes.merge(api_routes))
        .layer(PropagateRequestIdLayer::new(axum::http::HeaderName::from_static("x-request-id")))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(move |request: &Request<Body>| {
                    let request_id = request
                        .extensions()
                        .get::<tower_http::request_id::RequestId>()
                        .map(|id| id.header_value().to_str().unwrap_or_default())
                        .unwrap_or_default()
                        .to_string();

                    tracing::info_span!(
                        "request",
                        "request_id" = %request_id,
                        "http.request.method" = %request.method(),
                        "url.path" = %request.uri().path(),
                        "http.response.status_code" = tracing::field::Empty,
                        "user_id" = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: std::time::Duration, _span: &tracing::Span| {
                        let status = response.status();
                        tracing::Span::current().record("http.response.status_code", status.as_u16());

                        tracing::info!(
                            latency_ms = %latency.as_millis(),
                            status = %status.as_u16(),
                            "request completed"
                        );
                    },
                )
                .on_failure(|error, _latency, _span: &tracing::Span| {
                    tracing::error!(error = %error, "request failed");
                }),
        )
        .layer(SetRequestIdLayer::new(
            axum::http::HeaderName::from_static("x-request-id"),
            MakeRequestUuid,
        ))
        .with_state(state)
}

pub fn mgmt_router(state: MgmtState) -> Router {
    Router::new().route("/livez", get(health::livez)).route("/readyz", get(health::readyz)).with_state(state)
}
