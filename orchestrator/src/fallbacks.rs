//! Built-in policy table and placeholder content
//!
//! Placeholders are deliberately generic: they never mention the uploaded
//! document and are identical on every call, signalling degraded service
//! rather than pretending to be a real result.

use std::collections::BTreeMap;

use serde_json::{Value, json};
use shared::{FallbackPolicy, OperationKind};

use crate::policy::{CountBounds, OperationPolicy, PolicyTable};

pub const DEFAULT_POLICY_VERSION: u32 = 1;
pub const DEFAULT_KEYWORD_TIMEOUT_MS: u64 = 45_000;
pub const DEFAULT_TRUNCATION_MARKER: &str = "...";

pub fn summary_payload() -> Value {
    json!(
        "Document Summary:\n\nThe full summary could not be generated in time. \
         The content appears to cover academic or professional material that requires detailed study.\n\n\
         Key points may include important concepts, methodologies, and conclusions relevant to the subject matter. \
         For a more detailed analysis, please try the summary generation again or use the Q&A feature to ask \
         specific questions about the content."
    )
}

pub fn flashcards_payload() -> Value {
    json!([
        {
            "question": "What is the main topic of this document?",
            "answer": "This document covers academic or professional content that requires study and analysis.",
            "category": "General",
            "difficulty": "Easy"
        },
        {
            "question": "What should you focus on when studying this material?",
            "answer": "Focus on key concepts, methodologies, and important conclusions presented in the content.",
            "category": "Study Tips",
            "difficulty": "Medium"
        }
    ])
}

pub fn quiz_payload() -> Value {
    json!([
        {
            "question": "What type of document is this?",
            "options": ["Academic/Professional document", "Fiction novel", "Recipe book", "Comic book"],
            "correct_answer": 0,
            "explanation": "Based on the content analysis, this appears to be academic or professional material.",
            "difficulty": "Easy"
        },
        {
            "question": "What is the best approach to studying this material?",
            "options": ["Skim through quickly", "Focus on key concepts and take notes", "Memorize every word", "Ignore the details"],
            "correct_answer": 1,
            "explanation": "Effective studying involves focusing on key concepts and taking detailed notes for better retention.",
            "difficulty": "Medium"
        }
    ])
}

fn entry(
    timeout_secs: u64,
    fallback: FallbackPolicy,
    char_budget: Option<usize>,
    count: Option<CountBounds>,
    payload: Option<Value>,
) -> OperationPolicy {
    OperationPolicy {
        timeout_ms: timeout_secs * 1000,
        fallback,
        char_budget,
        count,
        payload,
    }
}

/// Version 1 of the table, matching the deployed service's limits
pub fn default_table() -> PolicyTable {
    use FallbackPolicy::*;
    use OperationKind::*;

    let mut operations = BTreeMap::new();
    operations.insert(Upload, entry(120, Fail, None, None, None));
    operations.insert(Summary, entry(90, StaticPayload, Some(8000), None, Some(summary_payload())));
    operations.insert(
        Flashcards,
        entry(120, StaticPayload, Some(6000), Some(CountBounds::new(1, 20, 10)), Some(flashcards_payload())),
    );
    operations.insert(
        Quiz,
        entry(120, StaticPayload, Some(6000), Some(CountBounds::new(1, 15, 8)), Some(quiz_payload())),
    );
    operations.insert(ResearchPapers, entry(180, EmptyList, Some(4000), Some(CountBounds::new(1, 15, 10)), None));
    operations.insert(Videos, entry(150, EmptyList, Some(3000), Some(CountBounds::new(1, 12, 10)), None));
    operations.insert(WebResources, entry(150, EmptyList, Some(3000), Some(CountBounds::new(1, 15, 12)), None));
    operations.insert(QuestionAnswer, entry(60, Fail, Some(6000), None, None));

    PolicyTable {
        version: DEFAULT_POLICY_VERSION,
        keyword_timeout_ms: DEFAULT_KEYWORD_TIMEOUT_MS,
        truncation_marker: DEFAULT_TRUNCATION_MARKER.to_string(),
        operations,
    }
}
