//! Canned documents, reports and artifacts

use std::time::Duration;

use shared::{ExtractionReport, ExtractionStatus, Flashcard, QuizQuestion, ResearchPaper, TopicKeywords};
use webserver::Session;

pub struct TestFixtures;

impl TestFixtures {
    pub fn short_deadline() -> Duration {
        Duration::from_millis(50)
    }

    pub fn slow_work() -> Duration {
        Duration::from_millis(500)
    }

    pub fn pdf_bytes() -> Vec<u8> {
        b"%PDF-1.4\n1 0 obj << /Type /Catalog >> endobj\n%%EOF\n".to_vec()
    }

    /// `words` distinct-looking words separated by spaces
    pub fn document_text(words: usize) -> String {
        (0..words).map(|i| format!("photosynthesis{i}")).collect::<Vec<_>>().join(" ")
    }

    /// One text-bearing page
    pub fn text_report(words: usize) -> ExtractionReport {
        ExtractionReport {
            status: ExtractionStatus::Success,
            message: "Text extracted successfully".to_string(),
            text: Self::document_text(words),
            word_count: words,
            page_count: 1,
            methods_used: vec!["text_layer".to_string()],
        }
    }

    /// A scanned page: the text layer is empty
    pub fn scanned_report() -> ExtractionReport {
        ExtractionReport {
            status: ExtractionStatus::Success,
            message: "Text extracted successfully".to_string(),
            text: String::new(),
            word_count: 0,
            page_count: 1,
            methods_used: vec!["text_layer".to_string()],
        }
    }

    pub fn session_with_text(text: &str) -> Session {
        let report = ExtractionReport {
            word_count: text.split_whitespace().count(),
            text: text.to_string(),
            ..Self::text_report(0)
        };
        Session::from_upload("lecture.pdf", 2048, report)
    }

    pub fn session(words: usize) -> Session {
        Session::from_upload("lecture.pdf", 2048, Self::text_report(words))
    }

    pub fn flashcards(count: usize) -> Vec<Flashcard> {
        (0..count)
            .map(|i| Flashcard {
                question: format!("Question {i}?"),
                answer: format!("Answer {i}"),
                category: "Biology".to_string(),
                difficulty: "Medium".to_string(),
            })
            .collect()
    }

    pub fn quiz(count: usize) -> Vec<QuizQuestion> {
        (0..count)
            .map(|i| QuizQuestion {
                question: format!("Quiz question {i}?"),
                options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
                correct_answer: i % 4,
                explanation: "Because".to_string(),
                difficulty: "Easy".to_string(),
            })
            .collect()
    }

    pub fn topic() -> TopicKeywords {
        TopicKeywords {
            topic: "Photosynthesis".to_string(),
            keywords: vec!["chlorophyll".to_string(), "light reactions".to_string()],
            all_keywords: vec![
                "chlorophyll".to_string(),
                "light reactions".to_string(),
                "calvin cycle".to_string(),
            ],
        }
    }

    pub fn paper(title: &str) -> ResearchPaper {
        ResearchPaper {
            title: title.to_string(),
            authors: vec!["A. Researcher".to_string()],
            year: Some(2021),
            abstract_text: Some("An abstract.".to_string()),
            url: Some("https://example.org/paper".to_string()),
            venue: None,
            citation_count: Some(3),
        }
    }
}
