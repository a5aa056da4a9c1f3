//! Reading-list API client
//!
//! Fetches the user's unread reading list from the aggregation API and decodes
//! it into typed raw entries.

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;

use super::raw::RawListEntry;
use crate::config::ReadingListConfig;

/// Errors that can occur when fetching the reading list
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The API answered with something other than 200 OK
    #[error("Unexpected response status: {0}")]
    UnexpectedStatus(StatusCode),

    /// Failed to parse the JSON response body
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Client for the aggregation API's reading-list endpoint
#[derive(Debug, Clone)]
pub struct ReadingListClient {
    client: Client,
    url: String,
}

impl ReadingListClient {
    /// Creates a client for the user and endpoint in `config`
    pub fn new(config: &ReadingListConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Creates a client with a custom HTTP client
    pub fn with_client(client: Client, config: &ReadingListConfig) -> Self {
        Self {
            client,
            url: reading_list_url(&config.base_url, &config.username),
        }
    }

    /// URL requested by `fetch`
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetches the unread reading list
    ///
    /// # Returns
    /// * `Ok(Vec<RawListEntry>)` - The decoded items on a 200 response
    /// * `Err(FetchError)` - On network failure, any other status, or an undecodable body
    pub async fn fetch(&self) -> Result<Vec<RawListEntry>, FetchError> {
        debug!(url = %self.url, "fetching reading list");

        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::UnexpectedStatus(status));
        }

        let text = response.text().await?;
        let items: Vec<RawListEntry> = serde_json::from_str(&text)?;

        debug!(count = items.len(), "received reading list");
        Ok(items)
    }
}

/// Builds `{base}/api/anilist/reading-list/{username}?only_unread=true`
fn reading_list_url(base_url: &str, username: &str) -> String {
    format!(
        "{}/api/anilist/reading-list/{}?only_unread=true",
        base_url.trim_end_matches('/'),
        encode_path_segment(username)
    )
}

/// Percent-encodes everything outside the RFC 3986 unreserved set
fn encode_path_segment(s: &str) -> String {
    let mut encoded = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_list_url() {
        let config = ReadingListConfig::new("reader").with_base_url("https://tracker.example.org");
        let client = ReadingListClient::new(&config);
        assert_eq!(
            client.url(),
            "https://tracker.example.org/api/anilist/reading-list/reader?only_unread=true"
        );
    }

    #[test]
    fn test_reading_list_url_ignores_trailing_slash() {
        assert_eq!(
            reading_list_url("http://localhost:8000/", "reader"),
            "http://localhost:8000/api/anilist/reading-list/reader?only_unread=true"
        );
    }

    #[test]
    fn test_username_is_percent_encoded() {
        assert_eq!(encode_path_segment("plain_user-1.x~"), "plain_user-1.x~");
        assert_eq!(encode_path_segment("two words"), "two%20words");
        assert_eq!(encode_path_segment("a/b?c"), "a%2Fb%3Fc");
        assert_eq!(encode_path_segment("é"), "%C3%A9");
    }

    #[test]
    fn test_unexpected_status_message() {
        let err = FetchError::UnexpectedStatus(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_is_request_error() {
        // Port 9 (discard) on localhost is expected to refuse connections.
        let config = ReadingListConfig::new("reader").with_base_url("http://127.0.0.1:9");
        let client = ReadingListClient::new(&config);

        let result = client.fetch().await;

        assert!(matches!(result, Err(FetchError::RequestFailed(_))));
    }
}
