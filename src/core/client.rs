use reqwest::StatusCode;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::instrument;

use crate::core::config::Args;
use crate::core::error::{ConfigError, Error};
use crate::types::game::{BurstReport, LikeOutcome, PlayerInfo};

const RETRY_STATUSES: [StatusCode; 4] = [
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::BAD_GATEWAY,
    StatusCode::SERVICE_UNAVAILABLE,
    StatusCode::GATEWAY_TIMEOUT,
];

#[derive(Clone)]
pub(crate) struct Client {
    auth_client: reqwest::Client,
    client: reqwest::Client,
    auth_url: String,
    info_url: String,
    like_url: String,
    user_agent: String,
    info_timeout: Duration,
    like_timeout: Duration,
    retries: u32,
    backoff: Duration,
    burst_size: usize,
    burst_concurrency: usize,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("auth_url", &self.auth_url)
            .field("info_url", &self.info_url)
            .field("like_url", &self.like_url)
            .field("burst_size", &self.burst_size)
            .finish()
    }
}

impl Client {
    pub(crate) fn new(args: &Args) -> Result<Self, ConfigError> {
        // the token service sits behind a certificate that does not verify
        let auth_client = reqwest::ClientBuilder::new()
            .danger_accept_invalid_certs(true)
            .timeout(args.auth_timeout())
            .build()?;

        let client = reqwest::ClientBuilder::new().build()?;

        Ok(Self {
            auth_client,
            client,
            auth_url: args.auth_url.clone(),
            info_url: args.info_url.clone(),
            like_url: args.like_url.clone(),
            user_agent: args.user_agent.clone(),
            info_timeout: args.info_timeout(),
            like_timeout: args.like_timeout(),
            retries: args.auth_retries,
            backoff: args.retry_backoff(),
            burst_size: args.burst_size,
            burst_concurrency: args.burst_concurrency.max(1),
        })
    }

    fn backoff_duration(&self, attempt: u32) -> Duration {
        self.backoff * 2u32.saturating_pow(attempt.saturating_sub(1))
    }

    /// GET with retries on 5xx gateway statuses and transport failures.
    async fn get_with_retry(
        &self,
        query: &[(&str, &str)],
    ) -> Result<reqwest::Response, reqwest::Error> {
        let mut attempt = 0;

        loop {
            let result = self.auth_client.get(&self.auth_url).query(query).send().await;

            let retryable = match &result {
                Ok(resp) => RETRY_STATUSES.contains(&resp.status()),
                Err(e) => e.is_connect() || e.is_timeout(),
            };

            if !retryable || attempt >= self.retries {
                return result;
            }

            attempt += 1;
            let backoff = self.backoff_duration(attempt);
            tracing::debug!(attempt, backoff_ms = backoff.as_millis() as u64, "retrying");
            tokio::time::sleep(backoff).await;
        }
    }

    /// Exchanges one account's credential for a bearer token. Failures are
    /// logged and collapse to `None`.
    #[instrument(skip(self, password))]
    pub(crate) async fn fetch_token(&self, uid: &str, password: &str) -> Option<String> {
        let resp = match self
            .get_with_retry(&[("uid", uid), ("password", password)])
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                tracing::error!("token request for {} failed: {}", uid, e);
                return None;
            }
        };

        let status = resp.status();
        let body = match resp.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("token body for {} unreadable: {}", uid, e);
                return None;
            }
        };

        if status != StatusCode::OK {
            tracing::error!("{} for {}: {}", status, uid, body);
            return None;
        }

        let token = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("token").and_then(|t| t.as_str()).map(String::from));

        match token {
            Some(token) => {
                tracing::info!("token acquired for {}", uid);
                Some(token)
            }
            None => {
                tracing::error!("no token in response for {}: {}", uid, body);
                None
            }
        }
    }

    #[instrument(skip(self))]
    pub(crate) async fn player_info(&self, uid: &str, region: &str) -> PlayerInfo {
        let region = region.to_lowercase();

        let resp = match self
            .client
            .get(&self.info_url)
            .query(&[("uid", uid), ("region", region.as_str())])
            .timeout(self.info_timeout)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                return PlayerInfo::Failed {
                    status: None,
                    raw: None,
                    message: e.to_string(),
                };
            }
        };

        let status = resp.status();
        let raw = match resp.text().await {
            Ok(raw) => raw,
            Err(e) => {
                return PlayerInfo::Failed {
                    status: Some(status.as_u16()),
                    raw: None,
                    message: e.to_string(),
                };
            }
        };

        if status != StatusCode::OK {
            return PlayerInfo::Failed {
                status: Some(status.as_u16()),
                message: format!("Server returned {}", status.as_u16()),
                raw: Some(raw),
            };
        }

        match serde_json::from_str(&raw) {
            Ok(profile) => PlayerInfo::Profile(profile),
            Err(e) => PlayerInfo::Failed {
                status: Some(status.as_u16()),
                raw: Some(raw),
                message: e.to_string(),
            },
        }
    }

    async fn send_like(&self, body: String, token: &str) -> LikeOutcome {
        match self
            .client
            .post(&self.like_url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .bearer_auth(token)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(body)
            .timeout(self.like_timeout)
            .send()
            .await
        {
            Ok(resp) => LikeOutcome::Status(resp.status().as_u16()),
            Err(e) => LikeOutcome::Failed(e.to_string()),
        }
    }

    /// Fires `burst_size` like requests for `uid` and waits for every one of
    /// them. A failed request is recorded in the report, the rest carry on.
    #[instrument(skip(self, token))]
    pub(crate) async fn like_burst(&self, uid: &str, token: &str) -> Result<BurstReport, Error> {
        let body = serde_urlencoded::to_string([("uid", uid)])?;
        let permits = Arc::new(Semaphore::new(self.burst_concurrency));
        let token: Arc<str> = Arc::from(token);
        let mut set = JoinSet::new();

        for index in 0..self.burst_size {
            let client = self.clone();
            let body = body.clone();
            let token = token.clone();
            let permits = permits.clone();

            set.spawn(async move {
                let outcome = match permits.acquire_owned().await {
                    Ok(_permit) => client.send_like(body, &token).await,
                    Err(e) => LikeOutcome::Failed(e.to_string()),
                };
                (index, outcome)
            });
        }

        let mut outcomes: Vec<Option<LikeOutcome>> = vec![None; self.burst_size];
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((index, outcome)) => outcomes[index] = Some(outcome),
                Err(e) => tracing::error!("like task aborted: {}", e),
            }
        }

        let report = BurstReport {
            outcomes: outcomes
                .into_iter()
                .map(|o| o.unwrap_or_else(|| LikeOutcome::Failed("task aborted".into())))
                .collect(),
        };

        if report.failed() > 0 {
            tracing::warn!("{} of {} like requests failed", report.failed(), report.len());
        }
        tracing::info!(
            "burst for {} finished: {}/{} accepted",
            uid,
            report.succeeded(),
            report.len()
        );

        Ok(report)
    }
}
