//! Rat Race server binary.
//!
//! Loads configuration, connects to PostgreSQL, wires the adapters to the
//! application handlers, and serves the game API over HTTP.

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::get, Router};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ratrace::adapters::auth::JwtSessionValidator;
use ratrace::adapters::http::middleware::{auth_middleware, AuthState};
use ratrace::adapters::http::{catalog_routes, game_routes, GameHandlers};
use ratrace::adapters::postgres::{PostgresCatalogRepository, PostgresGameRepository};
use ratrace::application::handlers::game::{
    BuyDoodadHandler, DeleteGameHandler, EndTurnHandler, GetGameStateHandler,
    ListProfessionsHandler, PayLoanHandler, SellInvestmentHandler, StartGameHandler,
    TakeLoanHandler,
};
use ratrace::config::AppConfig;
use ratrace::ports::{CatalogRepository, GameRepository};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    tracing::info!(
        environment = ?config.server.environment,
        addr = %config.server.socket_addr(),
        "starting ratrace server"
    );

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .max_lifetime(config.database.max_lifetime())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let games: Arc<dyn GameRepository> = Arc::new(PostgresGameRepository::new(pool.clone()));
    let catalog: Arc<dyn CatalogRepository> =
        Arc::new(PostgresCatalogRepository::new(pool.clone()));
    let validator: AuthState = Arc::new(JwtSessionValidator::new(&config.auth));

    let handlers = GameHandlers::new(
        Arc::new(StartGameHandler::new(games.clone(), catalog.clone())),
        Arc::new(GetGameStateHandler::new(games.clone(), catalog.clone())),
        Arc::new(DeleteGameHandler::new(games.clone())),
        Arc::new(BuyDoodadHandler::new(games.clone(), catalog.clone())),
        Arc::new(TakeLoanHandler::new(games.clone())),
        Arc::new(PayLoanHandler::new(games.clone())),
        Arc::new(SellInvestmentHandler::new(games.clone())),
        Arc::new(EndTurnHandler::new(games.clone(), catalog.clone())),
        Arc::new(ListProfessionsHandler::new(catalog.clone())),
    );

    let app = Router::new()
        .nest("/api/games", game_routes(handlers.clone()))
        .nest("/api", catalog_routes(handlers))
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.server.request_timeout_secs,
                )))
                .layer(cors_layer(&config))
                .layer(middleware::from_fn_with_state(validator, auth_middleware)),
        );

    let listener = tokio::net::TcpListener::bind(config.server.socket_addr()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shutting down, closing database pool");
    pool.close().await;

    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins = config.server.cors_origins_list();
    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<axum::http::HeaderValue> = origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
