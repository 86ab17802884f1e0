//! Cadence Catalog Client
//!
//! HTTP client for the Cadence backend.
//!
//! # Features
//!
//! - **Track listing**: `GET /api/tracks`, with a lenient variant that maps
//!   failures to an empty catalog
//! - **Streaming**: resolve a track to `/api/tracks/{id}` and download it
//!
//! # Example
//!
//! ```ignore
//! use cadence_client::{fetch_tracks_or_empty, CatalogClient, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CatalogClient::new(ClientConfig::new("http://localhost:8080"))?;
//!
//!     // Never fails; logs and returns nothing if the server is down
//!     let tracks = fetch_tracks_or_empty(&client).await;
//!     for track in &tracks {
//!         println!("{} - {} ({})", track.artist, track.title, client.stream_url(track));
//!     }
//!
//!     Ok(())
//! }
//! ```

mod catalog;
mod client;
mod error;
mod types;

// Re-export main types
pub use catalog::{fetch_tracks_or_empty, TrackCatalog};
pub use client::CatalogClient;
pub use error::{ClientError, Result};
pub use types::ClientConfig;
