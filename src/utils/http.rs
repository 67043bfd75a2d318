// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::Result;
use crate::models::ApiConfig;

/// Create a configured blocking HTTP client.
///
/// No timeout is applied unless `timeout_secs` is set.
pub fn create_client(config: &ApiConfig) -> Result<Client> {
    let client = Client::builder()
        .user_agent(&config.user_agent)
        .timeout(config.timeout_secs.map(Duration::from_secs))
        .build()?;
    Ok(client)
}
