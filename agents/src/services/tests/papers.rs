//! Tests for SemanticScholarClient against a mock HTTP server

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::error::{AgentError, ApiFailure};
use crate::services::papers::SemanticScholarClient;
use crate::traits::PaperDiscovery;

fn keywords() -> Vec<String> {
    vec!["transformer".to_string(), "attention".to_string()]
}

#[tokio::test]
async fn test_find_papers_maps_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/paper/search"))
        .and(query_param("query", "transformer attention"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 3,
            "data": [
                {
                    "paperId": "a",
                    "title": "Attention Is All You Need",
                    "authors": [{ "authorId": "1", "name": "Ashish Vaswani" }, { "name": null }],
                    "year": 2017,
                    "abstract": "The dominant sequence transduction models...",
                    "url": "https://www.semanticscholar.org/paper/a",
                    "venue": "NeurIPS",
                    "citationCount": 90000
                },
                { "paperId": "b", "title": null },
                { "paperId": "c", "title": "BERT", "venue": "" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = SemanticScholarClient::new(server.uri(), None);
    let papers = client.find_papers(&keywords(), "NLP", 2).await.unwrap();

    assert_eq!(papers.len(), 2);
    assert_eq!(papers[0].authors, vec!["Ashish Vaswani"]);
    assert_eq!(papers[0].citation_count, Some(90000));
    assert_eq!(papers[1].title, "BERT");
    assert_eq!(papers[1].venue, None);
}

#[tokio::test]
async fn test_find_papers_surfaces_rate_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/paper/search"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = SemanticScholarClient::new(server.uri(), None);
    let err = client.find_papers(&keywords(), "NLP", 5).await.unwrap_err();

    assert!(matches!(err, AgentError::Api { reason: ApiFailure::RateLimitExceeded, .. }));
}

#[tokio::test]
async fn test_find_papers_without_terms_skips_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = SemanticScholarClient::new(server.uri(), None);
    assert!(client.find_papers(&[], "  ", 5).await.unwrap().is_empty());
}
