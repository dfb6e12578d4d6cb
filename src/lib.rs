#![cfg_attr(doc, doc = include_str!("../README.md"))]

pub mod case;
pub mod client;
pub mod error;
pub mod normalize;
pub mod params;
pub mod schema;
pub(crate) mod serde_helpers;
pub mod types;

use reqwest::Request;
use serde_json::Value;

pub use crate::client::Client;
use crate::error::{Error, Status, StatusKind};

pub type Result<T> = std::result::Result<T, Error>;

/// Base URL of the public College Football Data API.
pub const DEFAULT_HOST: &str = "https://api.collegefootballdata.com";

/// Parses a raw response body and normalizes its keys to `snake_case`.
///
/// # Errors
///
/// Returns an [`Internal`](crate::error::Kind::Internal) error if `body` is not
/// JSON.
pub fn parse_response(body: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(body)?;
    Ok(normalize::normalize_owned(value))
}

#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        level = "debug",
        skip(client, request),
        fields(
            method = %request.method(),
            path = request.url().path(),
            status_code
        )
    )
)]
async fn request(client: &reqwest::Client, request: Request) -> Result<Value> {
    let method = request.method().clone();
    let url = request.url().to_string();

    let response = client.execute(request).await?;
    let status_code = response.status();

    #[cfg(feature = "tracing")]
    tracing::Span::current().record("status_code", status_code.as_u16());

    if !status_code.is_success() {
        let body = response.text().await.ok();
        let status = Status::classify(&method, &url, status_code, body.as_deref()).unwrap_or_else(
            || Status::with_kind(StatusKind::Other, &method, &url, status_code, body.as_deref()),
        );

        #[cfg(feature = "tracing")]
        tracing::warn!(
            status = %status_code,
            kind = %status.kind,
            message = %status.message,
            "API request failed"
        );

        return Err(status.into());
    }

    let body = response.text().await?;
    parse_response(&body)
}
