//! Gateway error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Start-up configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Failures of a single call against the CRM API
#[derive(Debug, Error)]
pub enum CrmError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("CRM API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed CRM API payload: {0}")]
    Decode(String),
}

pub type CrmResult<T> = Result<T, CrmError>;

/// Request-level errors surfaced by the route handlers.
///
/// Every variant becomes a `500` with a fixed plain-text message; the
/// underlying cause is logged where the error is raised.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("listing records failed: {0}")]
    UpstreamRead(#[source] CrmError),

    #[error("creating record failed: {0}")]
    UpstreamWrite(#[source] CrmError),

    #[error("template rendering failed: {0}")]
    Render(#[from] tera::Error),
}

impl GatewayError {
    /// Message shown to the end user.
    pub fn public_message(&self) -> &'static str {
        match self {
            GatewayError::UpstreamRead(_) => {
                "Error fetching data from HubSpot. Check your console."
            }
            GatewayError::UpstreamWrite(_) => {
                "Error creating a new record in HubSpot. Check your console."
            }
            GatewayError::Render(_) => "Error rendering page. Check your console.",
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.public_message()).into_response()
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;
