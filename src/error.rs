use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, warn};
use warp::{http::StatusCode, reject::Reject, Rejection, Reply};

/// Why a remote image could not be retrieved.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("invalid image location: {0}")]
    InvalidLocation(String),
    #[error("remote responded with status {0}")]
    Status(u16),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<url::ParseError> for FetchError {
    fn from(err: url::ParseError) -> Self {
        FetchError::InvalidLocation(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("rate limit exceeded")]
    RateLimitExceeded,
}

impl Reject for ServiceError {}

#[derive(Serialize)]
struct ErrorResponse {
    code: u16,
    message: String,
}

pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, std::convert::Infallible> {
    let (code, message) = if let Some(e) = err.find::<ServiceError>() {
        match e {
            ServiceError::RateLimitExceeded => {
                warn!("Request rejected: {}", e);
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    "Rate limit exceeded. Please try again later.".to_string(),
                )
            }
        }
    } else if err.is_not_found() {
        (
            StatusCode::NOT_FOUND,
            "The requested resource was not found".to_string(),
        )
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            "This method is not allowed for this endpoint".to_string(),
        )
    } else {
        error!("Unhandled rejection: {:?}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "An internal error occurred".to_string(),
        )
    };

    let json = warp::reply::json(&ErrorResponse {
        code: code.as_u16(),
        message,
    });

    Ok(warp::reply::with_status(json, code))
}
