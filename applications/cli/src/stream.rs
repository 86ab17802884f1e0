//! Audio fetching over the catalog client

use crate::media::AudioFetcher;
use cadence_client::CatalogClient;
use tokio::runtime::Runtime;

/// Fetches stream bytes with the catalog client on a blocking runtime
///
/// The player loop is synchronous; each fetch blocks until the whole track
/// has been downloaded.
pub struct CatalogFetcher {
    client: CatalogClient,
    runtime: Runtime,
}

impl CatalogFetcher {
    pub fn new(client: CatalogClient, runtime: Runtime) -> Self {
        Self { client, runtime }
    }
}

impl AudioFetcher for CatalogFetcher {
    fn fetch(&mut self, locator: &str) -> Result<Vec<u8>, String> {
        self.runtime
            .block_on(self.client.fetch_stream(locator))
            .map_err(|e| e.to_string())
    }
}
