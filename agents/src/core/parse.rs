//! Extraction of JSON payloads from free-form completion replies
//!
//! Models wrap JSON in code fences or surround it with prose; these helpers
//! find the outermost array or object and deserialize items one at a time so
//! a single malformed element does not discard the rest.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{AgentError, AgentResult};

static CODE_FENCE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:json|JSON)?\s*(.*?)```").ok());

/// Contents of the first code fence, or the whole reply
fn unfenced(reply: &str) -> &str {
    CODE_FENCE
        .as_ref()
        .and_then(|re| re.captures(reply))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(reply)
}

fn outermost(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..=end])
}

/// First JSON array found in the reply
pub fn extract_array(reply: &str) -> Option<Vec<Value>> {
    let candidate = outermost(unfenced(reply), '[', ']')?;
    serde_json::from_str(candidate).ok()
}

/// First JSON object found in the reply
pub fn extract_object(reply: &str) -> Option<Map<String, Value>> {
    let candidate = outermost(unfenced(reply), '{', '}')?;
    serde_json::from_str(candidate).ok()
}

/// Deserialize every well-formed element of the reply's JSON array
pub fn parse_items<T: DeserializeOwned>(reply: &str) -> AgentResult<Vec<T>> {
    let values = extract_array(reply).ok_or_else(|| AgentError::MalformedReply {
        message: "reply did not contain a JSON array".to_string(),
    })?;

    let total = values.len();
    let items: Vec<T> = values
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect();

    if items.len() < total {
        tracing::debug!(skipped = total - items.len(), "Skipped malformed items in reply");
    }
    Ok(items)
}

/// String array under `key`, ignoring non-string entries
pub fn string_list(object: &Map<String, Value>, key: &str) -> Vec<String> {
    object
        .get(key)
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_str)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Flashcard, QuizQuestion};

    #[test]
    fn test_parse_items_from_fenced_reply() {
        let reply = "Here are your cards:\n```json\n[{\"question\": \"Q1\", \"answer\": \"A1\"}]\n```\nGood luck!";
        let cards: Vec<Flashcard> = parse_items(reply).unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].category, "General");
        assert_eq!(cards[0].difficulty, "Medium");
    }

    #[test]
    fn test_parse_items_from_surrounding_prose() {
        let reply = "Sure! [{\"question\": \"Q\", \"answer\": \"A\", \"difficulty\": \"Hard\"}] Hope this helps.";
        let cards: Vec<Flashcard> = parse_items(reply).unwrap();
        assert_eq!(cards[0].difficulty, "Hard");
    }

    #[test]
    fn test_parse_items_skips_malformed_elements() {
        let reply = r#"[
            {"question": "Q1", "options": ["a", "b", "c", "d"], "correct_answer": 2},
            {"question": "Q2", "options": "not a list", "correct_answer": 0},
            {"question": "Q3", "options": ["a", "b", "c", "d"], "correct_answer": 1}
        ]"#;
        let quiz: Vec<QuizQuestion> = parse_items(reply).unwrap();
        assert_eq!(quiz.len(), 2);
        assert_eq!(quiz[1].question, "Q3");
    }

    #[test]
    fn test_parse_items_without_array_is_malformed() {
        let result: AgentResult<Vec<Flashcard>> = parse_items("I cannot help with that.");
        assert!(matches!(result, Err(AgentError::MalformedReply { .. })));
    }

    #[test]
    fn test_extract_object_and_string_list() {
        let reply = "```\n{\"topic\": \"Graph theory\", \"keywords\": [\"graphs\", 3, \" trees \"]}\n```";
        let object = extract_object(reply).unwrap();
        assert_eq!(object["topic"], "Graph theory");
        assert_eq!(string_list(&object, "keywords"), vec!["graphs", "trees"]);
        assert!(string_list(&object, "missing").is_empty());
    }
}
