use std::sync::Arc;

use auth::PasswordHasher;
use signup_service::config::Config;
use signup_service::domain::signup::models::ValidationPolicy;
use signup_service::domain::signup::service::SignUpService;
use signup_service::inbound::http::router::create_router;
use signup_service::outbound::repositories::InMemoryUserStore;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "signup_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "signup-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        work_factor = config.password.work_factor,
        hash_timeout_ms = config.password.hash_timeout_ms,
        strict_validation = config.signup.strict_validation,
        "Configuration loaded"
    );

    // An unsupported work factor is a deployment mistake; refuse to start
    let password_hasher = PasswordHasher::with_work_factor(config.password.work_factor)?;

    let user_store = Arc::new(InMemoryUserStore::new());
    tracing::info!(store = "in-memory", "User store ready");

    let signup_service = Arc::new(SignUpService::new(
        user_store,
        password_hasher,
        config.password.hash_timeout(),
    ));

    let validation_policy = ValidationPolicy {
        strict: config.signup.strict_validation,
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(signup_service, validation_policy);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}
