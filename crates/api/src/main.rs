use anyhow::Context;

use campusnav_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    campusnav_observability::init();

    let config = ApiConfig::from_env()?;
    let policy = config.load_policy()?;
    let source = config
        .policy_path
        .as_ref()
        .map_or_else(|| "builtin".to_string(), |p| p.display().to_string());
    tracing::info!(version = policy.version(), %source, "permission policy loaded");

    let app = campusnav_api::app::build_app(config.jwt_secret, policy);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
