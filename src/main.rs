use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use garage_hub::config::Config;
use garage_hub::router::{GarageState, garage_router, with_static_files};
use garage_hub::GarageStorage;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::from_env()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        listen_addr = %cfg.listen_addr,
        static_dir = %cfg.static_dir.display(),
        loglevel = %cfg.loglevel,
        insecure_cookie = cfg.insecure_cookie
    );

    let storage = GarageStorage::connect(&cfg.database_url).await?;

    for user in &cfg.bootstrap_users {
        if storage
            .ensure_user(&user.username, &user.password, user.nome_reale.as_deref())
            .await?
        {
            info!(username = %user.username, "bootstrap user created");
        }
    }

    let state = GarageState::new(storage, cfg.cookie_key(), !cfg.insecure_cookie);
    let app = with_static_files(garage_router(state), &cfg.static_dir);

    let listener = TcpListener::bind(cfg.listen_addr.as_str()).await?;
    info!("HTTP server listening on {}", cfg.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}
