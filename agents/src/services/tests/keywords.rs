//! Tests for keyword extraction

use std::sync::Arc;

use crate::error::{AgentError, ApiFailure};
use crate::services::keywords::{LlmKeywordExtractor, frequency_keywords};
use crate::traits::{KeywordExtractor, MockCompletionClient};

const DOCUMENT: &str = "Photosynthesis converts light energy into chemical energy. \
    Chlorophyll absorbs light, and photosynthesis produces glucose. \
    The chloroplast hosts photosynthesis and chlorophyll.";

fn extractor_replying(reply: Result<&'static str, ApiFailure>) -> LlmKeywordExtractor {
    let mut client = MockCompletionClient::new();
    client.expect_chat().times(1).returning(move |_, _| {
        reply
            .clone()
            .map(str::to_string)
            .map_err(|reason| AgentError::api("openai", reason))
    });
    LlmKeywordExtractor::new(Arc::new(client))
}

#[tokio::test]
async fn test_keywords_from_json_reply() {
    let extractor = extractor_replying(Ok(
        r#"{"topic": "Photosynthesis", "keywords": ["photosynthesis", "chlorophyll"], "all_keywords": ["glucose"]}"#,
    ));

    let result = extractor.extract_topic_and_keywords(DOCUMENT).await.unwrap();

    assert_eq!(result.topic, "Photosynthesis");
    assert_eq!(result.keywords, vec!["photosynthesis", "chlorophyll"]);
    assert_eq!(result.all_keywords, vec!["glucose", "photosynthesis", "chlorophyll"]);
}

#[tokio::test]
async fn test_unparseable_reply_falls_back_to_frequency() {
    let extractor = extractor_replying(Ok("The topic is plants."));

    let result = extractor.extract_topic_and_keywords(DOCUMENT).await.unwrap();

    assert_eq!(result.keywords[0], "photosynthesis");
}

#[tokio::test]
async fn test_client_failure_falls_back_to_frequency() {
    let extractor = extractor_replying(Err(ApiFailure::ServiceUnavailable));

    let result = extractor.extract_topic_and_keywords(DOCUMENT).await.unwrap();

    assert_eq!(result.keywords[0], "photosynthesis");
    assert_eq!(result.keywords[1], "chlorophyll");
}

#[test]
fn test_frequency_keywords_skip_stop_words_and_short_words() {
    let result = frequency_keywords("which which which the and graph graph theory");

    assert_eq!(result.keywords, vec!["graph", "theory"]);
    assert_eq!(result.topic, "graph theory");
}

#[test]
fn test_frequency_keywords_on_empty_text() {
    let result = frequency_keywords("");
    assert!(result.keywords.is_empty());
    assert!(result.topic.is_empty());
}
