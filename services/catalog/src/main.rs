use lettre::{AsyncSmtpTransport, Tokio1Executor};
use sea_orm::Database;
use tracing::info;

use toolhub_catalog::config::CatalogConfig;
use toolhub_catalog::domain::secret::SecretHasher;
use toolhub_catalog::infra::mail::SmtpCodeNotifier;
use toolhub_catalog::router::build_router;
use toolhub_catalog::state::AppState;
use toolhub_core::config::Config;
use toolhub_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing("info,sqlx=warn");

    let config = CatalogConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let redis_cfg = deadpool_redis::Config::from_url(&config.redis_url);
    let redis = redis_cfg
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .expect("failed to create Redis pool");

    let transport = AsyncSmtpTransport::<Tokio1Executor>::from_url(&config.smtp_url)
        .expect("invalid SMTP_URL")
        .build();
    let notifier = SmtpCodeNotifier {
        transport,
        from: config.mail_from.parse().expect("invalid MAIL_FROM"),
    };

    let hasher = SecretHasher::new(
        config.hash_memory_kib,
        config.hash_iterations,
        config.hash_parallelism,
    )
    .expect("invalid HASH_* parameters");

    let state = AppState {
        db,
        redis,
        notifier,
        hasher,
        session_secret: config.session_secret,
        cookie_domain: config.cookie_domain,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.catalog_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("catalog service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
