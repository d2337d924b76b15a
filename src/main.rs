//! Tutorly API server.
//!
//! Loads configuration from `TUTORLY__*` environment variables, connects to
//! PostgreSQL, optionally runs migrations, and serves the lesson API.

use std::error::Error;
use std::sync::Arc;

use axum::http::HeaderValue;
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use tutorly::adapters::auth::JwtIdentityResolver;
use tutorly::adapters::http::{api_router, AuthState, LessonHandlers};
use tutorly::adapters::meeting::LiveKitMeetingProvider;
use tutorly::adapters::postgres::{
    PostgresDirectory, PostgresFsmStore, PostgresLessonRepository, PostgresScheduleRepository,
};
use tutorly::application::handlers::{
    BookLessonHandler, GetLessonHandler, JoinLessonHandler, TransitionLessonHandler,
};
use tutorly::application::FsmEngine;
use tutorly::config::{AppConfig, LogFormat, ServerConfig};
use tutorly::ports::{DirectoryReader, LessonRepository, MeetingProvider, ScheduleRepository};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let pool = config.database.pool_options().connect(&config.database.url).await?;
    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("database migrations applied");
    }

    let lessons = lesson_handlers(&pool, &config);
    let auth: AuthState = Arc::new(JwtIdentityResolver::new(config.auth.jwt_config()));

    let app = api_router(lessons, auth)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors_layer(&config.server))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "tutorly listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    match server.log_format() {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).pretty().init(),
    }
}

fn lesson_handlers(pool: &PgPool, config: &AppConfig) -> LessonHandlers {
    let directory: Arc<dyn DirectoryReader> = Arc::new(PostgresDirectory::new(pool.clone()));
    let schedule: Arc<dyn ScheduleRepository> =
        Arc::new(PostgresScheduleRepository::new(pool.clone()));
    let lessons: Arc<dyn LessonRepository> =
        Arc::new(PostgresLessonRepository::new(pool.clone()));
    let meetings: Arc<dyn MeetingProvider> = Arc::new(LiveKitMeetingProvider::new(
        config.meeting.livekit_config(),
    ));
    let engine = FsmEngine::new(Arc::new(PostgresFsmStore::new(pool.clone())));

    LessonHandlers::new(
        Arc::new(BookLessonHandler::new(
            directory.clone(),
            schedule,
            lessons.clone(),
            engine.clone(),
        )),
        Arc::new(TransitionLessonHandler::new(
            directory.clone(),
            lessons.clone(),
            engine.clone(),
            meetings.clone(),
        )),
        Arc::new(JoinLessonHandler::new(
            directory.clone(),
            lessons.clone(),
            engine.clone(),
            meetings,
        )),
        Arc::new(GetLessonHandler::new(directory, lessons, engine)),
    )
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
