use std::sync::Arc;

use anyhow::Context;
use auth::Authenticator;
use auth::PasswordHasher;
use brain_service::config::Config;
use brain_service::config::StorageBackend;
use brain_service::domain::authentication::ports::AuthServicePort;
use brain_service::domain::authentication::service::AuthService;
use brain_service::domain::content::ports::ContentServicePort;
use brain_service::domain::content::service::ContentService;
use brain_service::domain::share::ports::ShareServicePort;
use brain_service::domain::share::service::ShareService;
use brain_service::inbound::http::router::create_router;
use brain_service::outbound::repositories::InMemoryContentRepository;
use brain_service::outbound::repositories::InMemoryShareRepository;
use brain_service::outbound::repositories::InMemoryUserRepository;
use brain_service::outbound::repositories::PostgresContentRepository;
use brain_service::outbound::repositories::PostgresShareRepository;
use brain_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

struct Services {
    auth: Arc<dyn AuthServicePort>,
    share: Arc<dyn ShareServicePort>,
    content: Arc<dyn ContentServicePort>,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "brain_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "brain-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load().context("Failed to load configuration")?;

    tracing::info!(
        backend = ?config.database.backend,
        http_port = config.server.http_port,
        token_ttl_minutes = config.jwt.expiration_minutes,
        "Configuration loaded"
    );

    let password_hasher = PasswordHasher::with_cost(config.password.cost())
        .context("Invalid password hashing parameters")?;
    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        config.jwt.token_ttl(),
        password_hasher,
    ));

    let services = match config.database.backend {
        StorageBackend::Postgres => postgres_services(&config, authenticator).await?,
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            memory_services(authenticator)
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(services.auth, services.share, services.content);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}

async fn postgres_services(
    config: &Config,
    authenticator: Arc<Authenticator>,
) -> Result<Services, anyhow::Error> {
    let database_url = config
        .database
        .url
        .as_deref()
        .context("database.url is required for the postgres backend")?;

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let share_repository = Arc::new(PostgresShareRepository::new(pg_pool.clone()));
    let content_repository = Arc::new(PostgresContentRepository::new(pg_pool));

    Ok(Services {
        auth: Arc::new(AuthService::new(user_repository, authenticator)),
        share: Arc::new(ShareService::new(share_repository)),
        content: Arc::new(ContentService::new(content_repository)),
    })
}

fn memory_services(authenticator: Arc<Authenticator>) -> Services {
    Services {
        auth: Arc::new(AuthService::new(
            Arc::new(InMemoryUserRepository::new()),
            authenticator,
        )),
        share: Arc::new(ShareService::new(Arc::new(InMemoryShareRepository::new()))),
        content: Arc::new(ContentService::new(Arc::new(
            InMemoryContentRepository::new(),
        ))),
    }
}
