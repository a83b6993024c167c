//! Tests for YouTubeClient against a mock HTTP server

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::error::AgentError;
use crate::services::videos::YouTubeClient;
use crate::traits::VideoDiscovery;

#[tokio::test]
async fn test_find_videos_requires_api_key() {
    let client = YouTubeClient::new("http://127.0.0.1:9", Some("  ".to_string()));
    assert!(!client.is_configured());

    let err = client.find_videos(&["graphs".to_string()], "Graph theory", 5).await.unwrap_err();
    assert!(matches!(err, AgentError::NotConfigured { service: "youtube", .. }));
}

#[tokio::test]
async fn test_find_videos_builds_watch_urls() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("key", "yt-key"))
        .and(query_param("q", "graph theory"))
        .and(query_param("type", "video"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {
                    "id": { "kind": "youtube#video", "videoId": "abc123" },
                    "snippet": {
                        "title": "Graph Theory Basics",
                        "channelTitle": "Math Channel",
                        "description": "Intro lecture",
                        "publishedAt": "2021-03-01T00:00:00Z",
                        "thumbnails": { "default": { "url": "https://i.ytimg.com/vi/abc123/default.jpg" } }
                    }
                },
                {
                    "id": { "kind": "youtube#channel", "channelId": "xyz" },
                    "snippet": { "title": "A channel" }
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = YouTubeClient::new(server.uri(), Some("yt-key".to_string()));
    let videos = client
        .find_videos(&["graph".to_string(), "theory".to_string()], "Graphs", 10)
        .await
        .unwrap();

    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0].url, "https://www.youtube.com/watch?v=abc123");
    assert_eq!(videos[0].channel, "Math Channel");
    assert_eq!(videos[0].thumbnail.as_deref(), Some("https://i.ytimg.com/vi/abc123/default.jpg"));
}
