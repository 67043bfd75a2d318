//! Post listing API response structures.

use serde::Deserialize;

/// One page of the post listing.
#[derive(Debug, Default, Deserialize)]
pub struct PostPage {
    /// Absent when the page holds no posts
    #[serde(default)]
    pub data: Vec<Post>,

    #[serde(default)]
    pub meta: Option<PageMeta>,
}

impl PostPage {
    /// Cursor for the following page. An empty cursor means there is none.
    pub fn next_token(&self) -> Option<&str> {
        self.meta
            .as_ref()
            .and_then(|m| m.next_token.as_deref())
            .filter(|token| !token.is_empty())
    }
}

/// A published post. Only its raw text matters here.
#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub id: Option<String>,
    pub text: String,
}

impl Post {
    /// The first line of the text, trimmed.
    ///
    /// This is the key practices are matched against, so any change to how
    /// posts are formatted changes what counts as "already published".
    pub fn title_key(&self) -> &str {
        self.text.split('\n').next().unwrap_or_default().trim()
    }
}

/// Pagination metadata.
#[derive(Debug, Default, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub result_count: Option<u64>,

    #[serde(default)]
    pub next_token: Option<String>,
}
