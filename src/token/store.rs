use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::core::client::Client;
use crate::token::accounts::load_accounts;

pub(crate) type Tokens = BTreeMap<String, String>;

/// Account id to bearer token. The whole map is swapped on refresh, so a
/// reader holds either the old set or the new one.
#[derive(Clone, Debug, Default)]
pub(crate) struct TokenCache {
    tokens: Arc<RwLock<Arc<Tokens>>>,
}

impl TokenCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn snapshot(&self) -> Arc<Tokens> {
        self.tokens.read().await.clone()
    }

    pub(crate) async fn replace(&self, tokens: Tokens) {
        *self.tokens.write().await = Arc::new(tokens);
    }

    pub(crate) async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    /// Reloads the account store and re-acquires every token, one account
    /// at a time. Returns how many accounts ended up with a token.
    #[instrument(skip(self, client))]
    pub(crate) async fn refresh(&self, client: &Client, accounts_file: &str) -> usize {
        let accounts = load_accounts(accounts_file).await;

        let mut tokens = Tokens::new();
        for (uid, password) in &accounts {
            if let Some(token) = client.fetch_token(uid, password).await {
                tokens.insert(uid.clone(), token);
            }
        }

        let active = tokens.len();
        self.replace(tokens).await;

        tracing::info!("Tokens refreshed: {} active", active);
        active
    }
}

pub(crate) async fn refresh_loop(
    cache: TokenCache,
    client: Client,
    accounts_file: String,
    period: Duration,
) {
    let mut interval = tokio::time::interval(period);
    // the startup refresh already covered the first tick
    interval.tick().await;

    loop {
        interval.tick().await;
        cache.refresh(&client, &accounts_file).await;
    }
}
