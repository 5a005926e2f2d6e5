//! Commerce API connectivity check.
//!
//! # Environment Variables
//!
//! - `COMMERCE_API_URL` - Base URL of the commerce API server

use std::time::Duration;

/// Errors that can occur while probing the commerce API.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Commerce API unhealthy: HTTP {0}")]
    Unhealthy(reqwest::StatusCode),
}

/// Probe the commerce API health endpoint and report the result.
///
/// # Errors
///
/// Returns `CheckError` if the API is unreachable or reports unhealthy.
pub async fn commerce_api() -> Result<(), CheckError> {
    dotenvy::dotenv().ok();

    let base_url =
        std::env::var("COMMERCE_API_URL").map_err(|_| CheckError::MissingEnvVar("COMMERCE_API_URL"))?;
    let base_url = base_url.trim_end_matches('/');

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()?;

    tracing::info!("Probing {base_url}/health ...");
    let response = client.get(format!("{base_url}/health")).send().await?;

    let status = response.status();
    if status.is_success() {
        tracing::info!("Commerce API is healthy");
        Ok(())
    } else {
        Err(CheckError::Unhealthy(status))
    }
}
