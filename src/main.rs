use anyhow::Context;
use cars_api::{
    api::{create_router, AppState},
    config::Config,
    db::{self, SessionOptions},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = db::create_pool(&config)
        .await
        .context("Failed to connect to database")?;

    let state = AppState::new(pool, SessionOptions::from(&config));
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    tracing::info!("Cars API listening on http://{}", address);
    axum::serve(listener, app).await?;

    Ok(())
}
