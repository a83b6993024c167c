//! Test fixtures: canned artifacts and timings

use std::time::Duration;

use shared::{Flashcard, ResearchPaper};

pub struct TestFixtures;

impl TestFixtures {
    /// Deadline used for every kind in fast tests
    pub fn short_deadline() -> Duration {
        Duration::from_millis(50)
    }

    /// Comfortably longer than the short deadline
    pub fn slow_work() -> Duration {
        Duration::from_millis(500)
    }

    pub fn flashcards(count: usize) -> Vec<Flashcard> {
        (0..count)
            .map(|i| Flashcard {
                question: format!("Question {i}?"),
                answer: format!("Answer {i}"),
                category: "General".to_string(),
                difficulty: "Medium".to_string(),
            })
            .collect()
    }

    pub fn paper() -> ResearchPaper {
        ResearchPaper {
            title: "Attention Is All You Need".to_string(),
            authors: vec!["Ashish Vaswani".to_string()],
            year: Some(2017),
            abstract_text: Some("Transformers rely entirely on attention.".to_string()),
            url: Some("https://www.semanticscholar.org/paper/attention".to_string()),
            venue: Some("NeurIPS".to_string()),
            citation_count: Some(100_000),
        }
    }
}
