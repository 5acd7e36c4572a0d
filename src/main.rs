use backup_admin::{AdminState, Config, admin_router, db, service::BackupDirectory};
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

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
        admin_username = %cfg.admin_username,
        db_endpoint = %cfg.db_endpoint,
        db_name = %cfg.db_name,
        database_url_override = cfg.database_url.is_some(),
        backup_container = %cfg.backup_container,
        storage_account = %cfg.storage_account_name.as_deref().unwrap_or("<none>"),
        loglevel = %cfg.loglevel,
    );

    let backup_directory = BackupDirectory::from_config(&cfg)?;
    if backup_directory.is_none() {
        warn!("STORAGE_ACCOUNT_NAME is not set; backup endpoints will report a configuration error");
    }

    let messages = db::connect_lazy(cfg.database_target()?)?;
    if let Err(e) = messages.ensure_schema().await {
        warn!(error = %e, "could not ensure posts table; message endpoints may fail");
    }

    let addr = cfg.listen_addr.clone();
    let state = AdminState::new(cfg, backup_directory, messages);
    let app = admin_router(state);

    let listener = TcpListener::bind(&addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
