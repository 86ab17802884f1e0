//! Tests for the catalog client against a mock server.

use cadence_client::{fetch_tracks_or_empty, CatalogClient, ClientConfig, ClientError};
use cadence_playback::Track;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> CatalogClient {
    CatalogClient::new(ClientConfig::new(server.uri())).unwrap()
}

// =============================================================================
// Client Creation Tests
// =============================================================================

mod client_creation {
    use super::*;

    #[test]
    fn test_valid_http_url() {
        let client = CatalogClient::new(ClientConfig::new("http://localhost:8080"));
        assert!(client.is_ok());
    }

    #[test]
    fn test_empty_url_rejected() {
        match CatalogClient::new(ClientConfig::new("")).unwrap_err() {
            ClientError::InvalidUrl(msg) => assert!(msg.contains("empty")),
            other => panic!("Expected InvalidUrl error, got {:?}", other),
        }
    }

    #[test]
    fn test_url_without_scheme_rejected() {
        match CatalogClient::new(ClientConfig::new("example.com")).unwrap_err() {
            ClientError::InvalidUrl(msg) => {
                assert!(msg.contains("http://") || msg.contains("https://"));
            }
            other => panic!("Expected InvalidUrl error, got {:?}", other),
        }
    }

    #[test]
    fn test_url_normalization_trailing_slash() {
        let client = CatalogClient::new(ClientConfig::new("https://example.com/")).unwrap();
        assert_eq!(client.url(), "https://example.com");
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.stream_timeout_secs, 600);
    }
}

// =============================================================================
// Track Listing Tests
// =============================================================================

mod track_listing {
    use super::*;

    #[tokio::test]
    async fn test_list_tracks() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/tracks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {
                    "id": "1",
                    "title": "Snowfall",
                    "artist": "Mika",
                    "coverUrl": "https://img.example.com/1.jpg"
                },
                { "id": 2, "title": "Aurora", "artist": "Mika" }
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let tracks = client_for(&mock_server).list_tracks().await.unwrap();

        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].title, "Snowfall");
        assert_eq!(
            tracks[0].cover_url.as_deref(),
            Some("https://img.example.com/1.jpg")
        );
        assert_eq!(tracks[1].id, "2");
        assert!(tracks[1].cover_url.is_none());
    }

    #[tokio::test]
    async fn test_empty_list() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/tracks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&mock_server)
            .await;

        let tracks = client_for(&mock_server).list_tracks().await.unwrap();
        assert!(tracks.is_empty());
    }

    #[tokio::test]
    async fn test_non_array_body_is_parse_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/tracks"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"tracks": []})),
            )
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server).list_tracks().await;
        assert!(matches!(result, Err(ClientError::ParseError(_))));
    }

    #[tokio::test]
    async fn test_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/tracks"))
            .respond_with(ResponseTemplate::new(500).set_body_string("database down"))
            .mount(&mock_server)
            .await;

        match client_for(&mock_server).list_tracks().await.unwrap_err() {
            ClientError::ServerError { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "database down");
            }
            other => panic!("Expected ServerError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        // Port 1 is reserved and nothing listens there
        let client = CatalogClient::new(ClientConfig::new("http://127.0.0.1:1")).unwrap();

        let result = client.list_tracks().await;
        assert!(matches!(result, Err(ClientError::ServerUnreachable(_))));
    }

    #[tokio::test]
    async fn test_fetch_or_empty_swallows_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/tracks"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let tracks = fetch_tracks_or_empty(&client_for(&mock_server)).await;
        assert!(tracks.is_empty());
    }
}

// =============================================================================
// Streaming Tests
// =============================================================================

mod streaming {
    use super::*;

    #[tokio::test]
    async fn test_fetch_audio() {
        let mock_server = MockServer::start().await;
        let payload = vec![0x49, 0x44, 0x33, 0x04, 0x00];

        Mock::given(method("GET"))
            .and(path("/api/tracks/42"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "audio/mpeg")
                    .set_body_bytes(payload.clone()),
            )
            .mount(&mock_server)
            .await;

        let track = Track::new("42", "Answer", "Artist");
        let bytes = client_for(&mock_server).fetch_audio(&track).await.unwrap();

        assert_eq!(bytes, payload);
    }

    #[tokio::test]
    async fn test_fetch_audio_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/tracks/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let track = Track::new("missing", "Gone", "Artist");
        let result = client_for(&mock_server).fetch_audio(&track).await;

        assert!(matches!(
            result,
            Err(ClientError::ServerError { status: 404, .. })
        ));
    }

    #[test]
    fn test_stream_url() {
        let client = CatalogClient::new(ClientConfig::new("http://music.local:9000/")).unwrap();
        let track = Track::new("abc", "Title", "Artist");

        assert_eq!(
            client.stream_url(&track),
            "http://music.local:9000/api/tracks/abc"
        );
    }
}

mod relative_locators {
    use super::*;

    #[tokio::test]
    async fn test_fetch_stream_resolves_against_server() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/tracks/9"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8, 2, 3]))
            .expect(1)
            .mount(&mock_server)
            .await;

        let bytes = client_for(&mock_server)
            .fetch_stream("/api/tracks/9")
            .await
            .unwrap();

        assert_eq!(bytes, vec![1, 2, 3]);
    }
}

mod timeouts {
    use super::*;

    fn slow_server_client(server: &MockServer) -> CatalogClient {
        CatalogClient::new(ClientConfig {
            timeout_secs: 1,
            stream_timeout_secs: 10,
            ..ClientConfig::new(server.uri())
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_slow_download_uses_stream_timeout() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/tracks/long"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(vec![7u8; 16])
                    .set_delay(Duration::from_millis(1500)),
            )
            .mount(&mock_server)
            .await;

        let bytes = slow_server_client(&mock_server)
            .fetch_stream("/api/tracks/long")
            .await
            .unwrap();

        assert_eq!(bytes.len(), 16);
    }

    #[tokio::test]
    async fn test_slow_listing_times_out() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/tracks"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([]))
                    .set_delay(Duration::from_millis(1500)),
            )
            .mount(&mock_server)
            .await;

        let result = slow_server_client(&mock_server).list_tracks().await;
        assert!(matches!(result, Err(ClientError::ServerUnreachable(_))));
    }
}
