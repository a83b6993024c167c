//! Topic and keyword extraction
//!
//! The completion service is asked for a JSON object first; when it is
//! unreachable or its reply cannot be parsed, keywords come from a local
//! frequency ranking with English stop words removed.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;
use shared::{Component, TopicKeywords, component_warn};

use crate::core::{parse, prompt};
use crate::error::AgentResult;
use crate::traits::{CompletionClient, KeywordExtractor};

const KEYWORDS_MAX_TOKENS: u32 = 300;
const SEARCH_KEYWORDS: usize = 5;
const ALL_KEYWORDS: usize = 15;

static WORD: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"[A-Za-z][A-Za-z\-]{3,}").ok());

const STOP_WORDS: &[&str] = &[
    "about", "above", "after", "again", "against", "also", "although", "among", "another", "because", "been",
    "before", "being", "below", "between", "both", "could", "does", "doing", "down", "during", "each", "either",
    "every", "figure", "first", "from", "further", "have", "having", "here", "however", "into", "itself", "just",
    "many", "more", "most", "much", "must", "only", "other", "otherwise", "over", "page", "same", "second",
    "section", "should", "shown", "since", "some", "such", "table", "than", "that", "their", "them", "then",
    "there", "therefore", "these", "they", "third", "this", "those", "through", "thus", "under", "until", "upon",
    "used", "using", "very", "were", "what", "when", "where", "whether", "which", "while", "will", "with",
    "within", "without", "would", "your",
];

/// Keyword extractor that asks the completion service, with a local fallback
pub struct LlmKeywordExtractor {
    client: Arc<dyn CompletionClient>,
}

impl LlmKeywordExtractor {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl KeywordExtractor for LlmKeywordExtractor {
    async fn extract_topic_and_keywords(&self, text: &str) -> AgentResult<TopicKeywords> {
        let reply = match self.client.chat(prompt::topic_and_keywords(text), KEYWORDS_MAX_TOKENS).await {
            Ok(reply) => reply,
            Err(e) => {
                component_warn!(Component::Agents, error = %e, "⚠️ Keyword extraction fell back to word frequency");
                return Ok(frequency_keywords(text));
            }
        };

        match keywords_from_reply(&reply) {
            Some(extracted) => Ok(extracted),
            None => {
                component_warn!(Component::Agents, "⚠️ Unparseable keyword reply, using word frequency");
                Ok(frequency_keywords(text))
            }
        }
    }
}

fn keywords_from_reply(reply: &str) -> Option<TopicKeywords> {
    let object = parse::extract_object(reply)?;
    let mut keywords = parse::string_list(&object, "keywords");
    if keywords.is_empty() {
        return None;
    }
    keywords.truncate(SEARCH_KEYWORDS);

    let mut all_keywords = parse::string_list(&object, "all_keywords");
    for keyword in &keywords {
        if !all_keywords.contains(keyword) {
            all_keywords.push(keyword.clone());
        }
    }
    all_keywords.truncate(ALL_KEYWORDS.max(keywords.len()));

    let topic = object
        .get("topic")
        .and_then(|topic| topic.as_str())
        .map(|topic| topic.trim().to_string())
        .filter(|topic| !topic.is_empty())
        .unwrap_or_else(|| keywords.join(" "));

    Some(TopicKeywords { topic, keywords, all_keywords })
}

/// Rank words by frequency, ties broken alphabetically
pub fn frequency_keywords(text: &str) -> TopicKeywords {
    let Some(word) = WORD.as_ref() else {
        return TopicKeywords::default();
    };

    let mut counts: HashMap<String, usize> = HashMap::new();
    for token in word.find_iter(text) {
        let token = token.as_str().to_lowercase();
        if !STOP_WORDS.contains(&token.as_str()) {
            *counts.entry(token).or_default() += 1;
        }
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let all_keywords: Vec<String> = ranked.into_iter().take(ALL_KEYWORDS).map(|(word, _)| word).collect();
    let keywords: Vec<String> = all_keywords.iter().take(SEARCH_KEYWORDS).cloned().collect();
    let topic = keywords.iter().take(2).cloned().collect::<Vec<_>>().join(" ");

    TopicKeywords { topic, keywords, all_keywords }
}
