// src/services/posts.rs

//! Published post collector.
//!
//! Pages through the account's post listing and keeps the first line of every
//! post as its title key.

use std::collections::HashSet;

use reqwest::StatusCode;
use reqwest::blocking::Client;

use crate::error::{AppError, Result};
use crate::models::{ApiConfig, PostPage};
use crate::utils::{http, join_path};

/// Service for collecting title keys of already published posts.
pub struct PostCollector {
    client: Client,
    endpoint: String,
    max_results: u32,
    bearer_token: String,
}

impl PostCollector {
    /// Create a collector with its own HTTP client.
    pub fn new(config: &ApiConfig, bearer_token: impl Into<String>) -> Result<Self> {
        let client = http::create_client(config)?;
        Ok(Self::with_client(client, config, bearer_token))
    }

    /// Create a collector around an existing client.
    pub fn with_client(
        client: Client,
        config: &ApiConfig,
        bearer_token: impl Into<String>,
    ) -> Self {
        let user_id = config.user_id.as_str();
        Self {
            client,
            endpoint: join_path(&config.base_url, &["2", "users", user_id, "tweets"]),
            max_results: config.max_results,
            bearer_token: bearer_token.into(),
        }
    }

    /// Collect the title keys of every published post, in listing order.
    ///
    /// Any non-success status aborts the whole collection.
    pub fn collect(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        let mut cursor: Option<String> = None;
        let mut seen = HashSet::new();
        let mut page_number = 0usize;

        loop {
            page_number += 1;
            let page = self.fetch_page(cursor.as_deref())?;
            log::debug!("Page {}: {} posts", page_number, page.data.len());

            for post in &page.data {
                let key = post.title_key();
                log::debug!("Parsed post: {}", key);
                keys.push(key.to_string());
            }

            let Some(next) = page.next_token() else {
                break;
            };
            if !seen.insert(next.to_string()) {
                return Err(AppError::pagination(format!(
                    "next_token {next} repeated on page {page_number}"
                )));
            }
            log::debug!("Next token: {}", next);
            cursor = Some(next.to_string());
        }

        log::info!(
            "Collected {} published posts over {} pages",
            keys.len(),
            page_number
        );
        Ok(keys)
    }

    /// Fetch one page, starting at `cursor` when given.
    fn fetch_page(&self, cursor: Option<&str>) -> Result<PostPage> {
        let max_results = self.max_results.to_string();
        let mut query = vec![
            ("tweet.fields", "created_at"),
            ("max_results", max_results.as_str()),
        ];
        if let Some(token) = cursor {
            query.push(("pagination_token", token));
        }

        let response = self
            .client
            .get(&self.endpoint)
            .bearer_auth(&self.bearer_token)
            .query(&query)
            .send()?;

        let status = response.status();
        if status != StatusCode::OK {
            log::error!("HTTP Error: {}", status);
            return Err(AppError::Status {
                status: status.as_u16(),
                url: self.endpoint.clone(),
            });
        }

        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}
