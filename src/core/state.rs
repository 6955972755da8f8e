use std::sync::Arc;

use crate::core::client::Client;
use crate::core::config::Args;
use crate::core::error::{ConfigError, Error};
use crate::token::store::TokenCache;
use crate::types::game::PlayerInfo;
use crate::types::response::LikeSummary;
use crate::utils::usage::UsageTracker;

#[derive(Clone, Debug)]
pub(crate) struct AppState {
    pub(crate) client: Client,
    pub(crate) tokens: TokenCache,
    pub(crate) usage: UsageTracker,
    pub(crate) access_key: Arc<str>,
    pub(crate) accounts_file: Arc<str>,
}

impl AppState {
    pub(crate) fn new(args: &Args, tokens: TokenCache) -> Result<Self, ConfigError> {
        Ok(AppState {
            client: Client::new(args)?,
            tokens,
            usage: UsageTracker::new(args.daily_limit),
            access_key: Arc::from(args.access_key.as_str()),
            accounts_file: Arc::from(args.accounts_file.as_str()),
        })
    }

    pub(crate) async fn refresh_tokens(&self) -> usize {
        self.tokens.refresh(&self.client, &self.accounts_file).await
    }

    /// Picks the named account's token, or the first cached one.
    async fn select_token(&self, account: Option<&str>) -> Result<String, Error> {
        let tokens = self.tokens.snapshot().await;

        if tokens.is_empty() {
            return Err(Error::NoTokens);
        }

        match account {
            Some(account) => tokens
                .get(account)
                .cloned()
                .ok_or_else(|| Error::UnknownAccount(account.to_string())),
            None => tokens.values().next().cloned().ok_or(Error::NoTokens),
        }
    }

    pub(crate) async fn send_likes(
        &self,
        uid: &str,
        region: &str,
        account: Option<&str>,
    ) -> Result<LikeSummary, Error> {
        let token = self.select_token(account).await?;

        let before = self.client.player_info(uid, region).await;
        if let PlayerInfo::Failed { message, .. } = &before {
            tracing::warn!("player info before burst failed: {}", message);
        }
        let before = before.snapshot();

        self.client.like_burst(uid, &token).await?;

        let after = self.client.player_info(uid, region).await;
        if let PlayerInfo::Failed { message, .. } = &after {
            tracing::warn!("player info after burst failed: {}", message);
        }
        let after = after.snapshot();

        Ok(LikeSummary::new(
            uid.to_string(),
            before.nickname,
            before.liked,
            after.liked,
        ))
    }
}
