use axum::BoxError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
    #[error("Reqwest error: {0}")]
    HTTPClient(#[from] reqwest::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Reqwest error: {0}")]
    HTTPClient(#[from] reqwest::Error),
    #[error("URL encoding error: {0}")]
    URLEncode(#[from] serde_urlencoded::ser::Error),
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Invalid API key")]
    InvalidKey,
    #[error("uid and server_name required")]
    MissingParams,
    #[error("No tokens available")]
    NoTokens,
    #[error("No token for account {0}")]
    UnknownAccount(String),
    #[error("Daily limit reached")]
    DailyLimit,
    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!("{:?}", self);

        let (status, message) = match self {
            Error::HTTPClient(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
            Error::URLEncode(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
            Error::Serialize(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
            Error::InvalidKey => (StatusCode::FORBIDDEN, "Invalid API key"),
            Error::MissingParams => (StatusCode::BAD_REQUEST, "uid and server_name required"),
            Error::NoTokens => (StatusCode::SERVICE_UNAVAILABLE, "No tokens available"),
            Error::UnknownAccount(_) => (StatusCode::NOT_FOUND, "No token for account"),
            Error::DailyLimit => (StatusCode::TOO_MANY_REQUESTS, "Daily limit reached"),
            Error::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub(crate) async fn handle_middleware_errors(err: BoxError) -> (StatusCode, &'static str) {
    tracing::error!("Unhandled error: {:?}", err);
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
}
