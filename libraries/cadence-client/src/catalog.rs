//! Track catalog abstraction.

use crate::error::Result;
use async_trait::async_trait;
use cadence_playback::Track;
use tracing::warn;

/// Source of the track list
#[async_trait]
pub trait TrackCatalog: Send + Sync {
    /// Fetch every track, in server order
    async fn list_tracks(&self) -> Result<Vec<Track>>;
}

/// Fetch the track list, treating any failure as an empty catalog.
///
/// The player stays idle on an empty list, so a failed fetch is logged and
/// otherwise behaves like a server with no tracks.
pub async fn fetch_tracks_or_empty<C>(catalog: &C) -> Vec<Track>
where
    C: TrackCatalog + ?Sized,
{
    match catalog.list_tracks().await {
        Ok(tracks) => tracks,
        Err(e) => {
            warn!("Error fetching tracks: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use mockall::mock;

    mock! {
        Catalog {}

        #[async_trait]
        impl TrackCatalog for Catalog {
            async fn list_tracks(&self) -> Result<Vec<Track>>;
        }
    }

    #[tokio::test]
    async fn passes_tracks_through() {
        let mut catalog = MockCatalog::new();
        catalog
            .expect_list_tracks()
            .times(1)
            .returning(|| Ok(vec![Track::new("1", "One", "A")]));

        let tracks = fetch_tracks_or_empty(&catalog).await;
        assert_eq!(tracks.len(), 1);
    }

    #[tokio::test]
    async fn failure_becomes_empty_list() {
        let mut catalog = MockCatalog::new();
        catalog
            .expect_list_tracks()
            .returning(|| Err(ClientError::ServerUnreachable("connection refused".into())));

        assert!(fetch_tracks_or_empty(&catalog).await.is_empty());
    }
}
