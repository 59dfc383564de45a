//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;

use anyhow::Context;
use axum::{
    Json, Router,
    http::{HeaderName, HeaderValue, Method, header},
    routing::get,
};
use club::{
    ClubConfig, ExpoPushSender, InMemoryClubRepository, PgClubRepository, club_router,
    club_router_generic,
};
use kernel::error::app_error::AppError;
use membership::domain::repository::SessionRepository;
use membership::{
    HttpIdentityGateway, InMemoryMembershipRepository, MembershipConfig, PgMembershipRepository,
    membership_router, membership_router_generic,
};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,membership=info,club=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    let gateway = HttpIdentityGateway::new(&config.membership)?;
    let push = ExpoPushSender::new(&config.club)?;

    let (api, pool) = match config.database_url.as_deref() {
        Some(database_url) => {
            let pool = connect(database_url).await?;

            let members = PgMembershipRepository::new(pool.clone());
            cleanup_sessions(&members).await;

            let api = membership_router(members.clone(), gateway, config.membership.clone())
                .merge(club_router(
                    members,
                    PgClubRepository::new(pool.clone()),
                    push,
                    config.membership.clone(),
                    config.club.clone(),
                ));
            (api, Some(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using the in-memory store; data is lost on exit");

            let members = InMemoryMembershipRepository::new();
            let api = in_memory_api(members, gateway, push, &config.membership, &config.club);
            (api, None)
        }
    };

    let app = Router::new()
        .route("/", get(health(&config.club)))
        .nest("/api", api.route("/", get(health(&config.club))))
        .fallback(route_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors(&config.frontend_origins));

    // Start server
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    if let Some(pool) = pool {
        pool.close().await;
        tracing::info!("Database pool closed");
    }

    Ok(())
}

async fn connect(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    Ok(pool)
}

// Errors here should not prevent server startup
async fn cleanup_sessions<R: SessionRepository>(repo: &R) {
    if let Err(e) = repo.cleanup_expired_sessions().await {
        tracing::warn!(error = %e, "Session cleanup failed, continuing anyway");
    }
}

fn in_memory_api(
    members: InMemoryMembershipRepository,
    gateway: HttpIdentityGateway,
    push: ExpoPushSender,
    membership_config: &MembershipConfig,
    club_config: &ClubConfig,
) -> Router {
    membership_router_generic(members.clone(), gateway, membership_config.clone()).merge(
        club_router_generic(
            members,
            InMemoryClubRepository::new(),
            push,
            membership_config.clone(),
            club_config.clone(),
        ),
    )
}

fn health(
    club: &ClubConfig,
) -> impl Fn() -> std::future::Ready<Json<serde_json::Value>> + Clone + Send + Sync + 'static {
    let body = serde_json::json!({
        "message": format!("{} API", club.club_info.name),
        "status": "running",
    });
    move || std::future::ready(Json(body.clone()))
}

async fn route_not_found() -> AppError {
    AppError::not_found("Route not found").with_code("ROUTE_NOT_FOUND")
}

fn cors(frontend_origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            HeaderName::from_static("x-session-id"),
            HeaderName::from_static("x-bootstrap-secret"),
        ]))
        .allow_credentials(true)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, stopping...");
}
