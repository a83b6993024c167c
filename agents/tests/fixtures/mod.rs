//! Canned completion replies for integration tests

#![allow(dead_code)]

use serde_json::{Value, json};

/// Chat completion response body wrapping `content`
pub fn completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": content }, "finish_reason": "stop" }],
        "usage": { "prompt_tokens": 100, "completion_tokens": 50, "total_tokens": 150 }
    })
}

pub fn flashcards_reply() -> &'static str {
    r#"Here are the flashcards:
```json
[
  {"question": "What does chlorophyll absorb?", "answer": "Light energy", "category": "Biology", "difficulty": "Easy"},
  {"question": "Where does photosynthesis happen?", "answer": "In the chloroplast", "category": "Biology", "difficulty": "Medium"}
]
```"#
}

pub fn quiz_reply() -> &'static str {
    r#"[{"question": "What is produced by photosynthesis?", "options": ["Glucose", "Salt", "Iron", "Helium"], "correct_answer": 0, "explanation": "Glucose stores chemical energy.", "difficulty": "Easy"}]"#
}

pub fn document() -> String {
    "Photosynthesis converts light energy into chemical energy stored in glucose. ".repeat(20)
}
