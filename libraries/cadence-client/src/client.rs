//! Catalog server client.

use crate::catalog::TrackCatalog;
use crate::error::{ClientError, Result};
use crate::types::ClientConfig;
use async_trait::async_trait;
use cadence_playback::{stream_locator, Track};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Client for the catalog server.
///
/// Lists tracks and resolves them to playable stream URLs.
///
/// # Example
///
/// ```ignore
/// use cadence_client::{CatalogClient, ClientConfig};
///
/// let client = CatalogClient::new(ClientConfig::new("http://localhost:8080"))?;
///
/// let tracks = client.list_tracks().await?;
/// println!("Found {} tracks", tracks.len());
///
/// let audio = client.fetch_audio(&tracks[0]).await?;
/// println!("Downloaded {} bytes", audio.len());
/// ```
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: String,
    stream_timeout: Duration,
}

impl CatalogClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = normalize_url(&config.url)?;

        // Create HTTP client with reasonable defaults
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(format!("Cadence/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self {
            http,
            base_url,
            stream_timeout: Duration::from_secs(config.stream_timeout_secs),
        })
    }

    /// Get the normalized server URL (no trailing slash).
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the full track list.
    pub async fn list_tracks(&self) -> Result<Vec<Track>> {
        let url = format!("{}/api/tracks", self.base_url);
        debug!(url = %url, "Fetching tracks");

        let response = self.get(&url, None).await?;

        let tracks: Vec<Track> = response.json().await.map_err(|e| {
            ClientError::ParseError(format!("Failed to parse track list: {}", e))
        })?;

        info!(tracks = tracks.len(), "Fetched track list");
        Ok(tracks)
    }

    /// URL the server streams a track from.
    pub fn stream_url(&self, track: &Track) -> String {
        stream_locator(&self.base_url, track.media_ref())
    }

    /// Download a track's audio bytes.
    pub async fn fetch_audio(&self, track: &Track) -> Result<Vec<u8>> {
        debug!(track_id = %track.id, "Fetching audio");
        self.fetch_stream(&self.stream_url(track)).await
    }

    /// Download audio bytes from a stream URL.
    ///
    /// Relative locators (`/api/tracks/...`) resolve against the server URL.
    /// Downloads use the stream timeout instead of the request timeout.
    pub async fn fetch_stream(&self, locator: &str) -> Result<Vec<u8>> {
        let url = if locator.starts_with('/') {
            format!("{}{}", self.base_url, locator)
        } else {
            locator.to_string()
        };
        debug!(url = %url, "Fetching stream");

        let response = self.get(&url, Some(self.stream_timeout)).await?;
        let bytes = response.bytes().await?;

        debug!(url = %url, bytes = bytes.len(), "Fetched stream");
        Ok(bytes.to_vec())
    }

    async fn get(&self, url: &str, timeout: Option<Duration>) -> Result<Response> {
        let mut request = self.http.get(url);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                ClientError::ServerUnreachable(e.to_string())
            } else {
                ClientError::Request(e)
            }
        })?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ClientError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }
}

#[async_trait]
impl TrackCatalog for CatalogClient {
    async fn list_tracks(&self) -> Result<Vec<Track>> {
        CatalogClient::list_tracks(self).await
    }
}

/// Validate a server URL and strip trailing slashes.
fn normalize_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
    }

    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(ClientError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }

    let parsed = Url::parse(trimmed).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
    if parsed.host_str().is_none() {
        return Err(ClientError::InvalidUrl("URL has no host".into()));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_trailing_slashes() {
        assert_eq!(
            normalize_url("http://localhost:8080///").unwrap(),
            "http://localhost:8080"
        );
        assert_eq!(
            normalize_url(" https://music.example.com/base/ ").unwrap(),
            "https://music.example.com/base"
        );
    }

    #[test]
    fn rejects_bad_urls() {
        assert!(matches!(normalize_url(""), Err(ClientError::InvalidUrl(_))));
        assert!(matches!(
            normalize_url("ftp://example.com"),
            Err(ClientError::InvalidUrl(_))
        ));
        assert!(matches!(
            normalize_url("example.com"),
            Err(ClientError::InvalidUrl(_))
        ));
        assert!(matches!(
            normalize_url("http://"),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn stream_url_uses_media_ref() {
        let client = CatalogClient::new(ClientConfig::new("http://localhost:8080/")).unwrap();
        let mut track = Track::new("7", "Seven", "Artist");
        assert_eq!(client.stream_url(&track), "http://localhost:8080/api/tracks/7");

        track.media_ref = Some("blob-7".into());
        assert_eq!(
            client.stream_url(&track),
            "http://localhost:8080/api/tracks/blob-7"
        );
    }
}
