//! Parley service entry point.
//!
//! Loads configuration, wires adapters into the application handlers,
//! and serves the HTTP API.

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use parley::adapters::ai::ConfigProviderResolver;
use parley::adapters::auth::StaticKeyValidator;
use parley::adapters::events::InMemoryEventPublisher;
use parley::adapters::http::{api_router, InterviewHandlers, SessionHandlers};
use parley::adapters::postgres::{
    PostgresInterviewRepository, PostgresSessionRepository, PostgresSummaryRepository,
    PostgresTranscriptStore,
};
use parley::application::handlers::interview::{
    ArchiveInterviewHandler, CreateInterviewHandler, ListInterviewSessionsHandler,
    ListInterviewsHandler, ResolveShareTokenHandler,
};
use parley::application::handlers::session::{
    AbandonSessionHandler, CompleteEarlyHandler, Finalizer, GetSummaryHandler,
    GetTranscriptHandler, StartSessionHandler, SubmitAnswerHandler,
};
use parley::config::AppConfig;
use parley::domain::foundation::OwnerId;
use parley::ports::{
    EventPublisher, InterviewRepository, OperatorValidator, ProviderResolver, SessionRepository,
    SummaryRepository, TranscriptStore,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .init();

    tracing::info!(
        environment = ?config.server.environment,
        "starting parley"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    // Storage adapters
    let interviews: Arc<dyn InterviewRepository> =
        Arc::new(PostgresInterviewRepository::new(pool.clone()));
    let sessions: Arc<dyn SessionRepository> =
        Arc::new(PostgresSessionRepository::new(pool.clone()));
    let transcripts: Arc<dyn TranscriptStore> =
        Arc::new(PostgresTranscriptStore::new(pool.clone()));
    let summaries: Arc<dyn SummaryRepository> = Arc::new(PostgresSummaryRepository::new(pool));

    // Completion, events, auth
    let providers: Arc<dyn ProviderResolver> =
        Arc::new(ConfigProviderResolver::new(config.ai.clone()));
    let events: Arc<dyn EventPublisher> = Arc::new(InMemoryEventPublisher::new());
    let operator_id = OwnerId::new(config.auth.operator_id.clone())?;
    let validator: Arc<dyn OperatorValidator> = Arc::new(StaticKeyValidator::new(
        config.auth.operator_key.clone(),
        operator_id,
    ));

    // Application handlers
    let finalizer = Arc::new(Finalizer::new(
        sessions.clone(),
        transcripts.clone(),
        summaries.clone(),
        providers.clone(),
        events.clone(),
    ));

    let interview_handlers = InterviewHandlers::new(
        Arc::new(CreateInterviewHandler::new(
            interviews.clone(),
            events.clone(),
        )),
        Arc::new(ArchiveInterviewHandler::new(
            interviews.clone(),
            events.clone(),
        )),
        Arc::new(ListInterviewsHandler::new(interviews.clone())),
        Arc::new(ListInterviewSessionsHandler::new(
            interviews.clone(),
            sessions.clone(),
        )),
        Arc::new(ResolveShareTokenHandler::new(interviews.clone())),
    );

    let session_handlers = SessionHandlers::new(
        Arc::new(StartSessionHandler::new(
            interviews.clone(),
            sessions.clone(),
            transcripts.clone(),
            providers.clone(),
            events.clone(),
        )),
        Arc::new(SubmitAnswerHandler::new(
            interviews.clone(),
            sessions.clone(),
            transcripts.clone(),
            providers,
            events.clone(),
            finalizer.clone(),
        )),
        Arc::new(CompleteEarlyHandler::new(
            interviews.clone(),
            sessions.clone(),
            finalizer,
        )),
        Arc::new(AbandonSessionHandler::new(
            interviews.clone(),
            sessions.clone(),
            events,
        )),
        Arc::new(GetSummaryHandler::new(sessions.clone(), summaries.clone())),
        Arc::new(GetTranscriptHandler::new(
            interviews, sessions, transcripts, summaries,
        )),
    );

    let cors = build_cors(&config);

    let app = api_router(interview_handlers, session_handlers, validator)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors);

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_cors(config: &AppConfig) -> CorsLayer {
    let origins = config.server.cors_origins_list();
    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
