pub(crate) mod core;
pub(crate) mod routes;
pub(crate) mod token;
pub(crate) mod types;
pub(crate) mod utils;

#[cfg(test)]
pub(crate) mod test_support;

use std::time::Duration;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::core::error::ConfigError as Error;
use crate::core::{config::Args, state::AppState};
use crate::token::store::{TokenCache, refresh_loop};

pub async fn run() -> Result<(), Error> {
    let config = Args::load().map_err(Error::Config)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_new(&config.log_level).unwrap_or_default())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = AppState::new(&config, TokenCache::new())?;

    state.refresh_tokens().await;

    if config.token_refresh_secs > 0 {
        let cache = state.tokens.clone();
        let client = state.client.clone();
        let accounts_file = config.accounts_file.clone();
        let period = Duration::from_secs(config.token_refresh_secs);

        tokio::spawn(async move {
            refresh_loop(cache, client, accounts_file, period).await;
        });
    }

    let app = routes::router::routes(state, config.requests_per_second);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .map_err(Error::IO)?;

    tracing::debug!("listening on port {}", config.port);

    axum::serve(listener, app).await.map_err(Error::IO)?;

    Ok(())
}
