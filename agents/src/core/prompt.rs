//! Prompt templates for the completion service
//!
//! Text handed to these builders has already been cut to the operation's
//! character budget; nothing here truncates.

use shared::ChatMessage;

const TUTOR_ROLE: &str = "You are an expert tutor who turns study material into clear, accurate learning aids. \
     Only use information that appears in the provided document.";

const JSON_ROLE: &str = "You are a precise assistant that answers with valid JSON only, without commentary or markdown.";

pub fn summary(text: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(TUTOR_ROLE),
        ChatMessage::user(format!(
            "Write a structured study summary of the document below.\n\
             Start with a one-paragraph overview, then list the key concepts, \
             important details and conclusions as short sections.\n\n\
             Document:\n{text}"
        )),
    ]
}

pub fn flashcards(text: &str, count: u32) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(JSON_ROLE),
        ChatMessage::user(format!(
            "Create exactly {count} flashcards from the document below.\n\
             Return a JSON array where each element has the keys \
             \"question\", \"answer\", \"category\" and \"difficulty\" \
             (one of \"Easy\", \"Medium\", \"Hard\").\n\n\
             Document:\n{text}"
        )),
    ]
}

pub fn quiz(text: &str, count: u32) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(JSON_ROLE),
        ChatMessage::user(format!(
            "Create exactly {count} multiple choice questions from the document below.\n\
             Return a JSON array where each element has the keys \"question\", \
             \"options\" (exactly 4 strings), \"correct_answer\" (the 0-based index \
             of the correct option), \"explanation\" and \"difficulty\" \
             (one of \"Easy\", \"Medium\", \"Hard\").\n\n\
             Document:\n{text}"
        )),
    ]
}

pub fn answer(text: &str, question: &str) -> Vec<ChatMessage> {
    vec![ChatMessage::user(format!(
        "Based on the following document content, answer the question comprehensively and accurately.\n\n\
         Document Content:\n{text}\n\n\
         Question: {question}\n\n\
         Instructions:\n\
         - Give a detailed, accurate answer based on the document\n\
         - If the information is not in the document, say so clearly\n\
         - Use specific examples from the document when possible\n\
         - Keep the answer well structured and easy to follow"
    ))]
}

pub fn topic_and_keywords(text: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(JSON_ROLE),
        ChatMessage::user(format!(
            "Identify the main academic topic of the document below and the terms \
             a student would search for to find related material.\n\
             Return a JSON object with the keys \"topic\" (a short phrase), \
             \"keywords\" (the 5 best search terms) and \"all_keywords\" \
             (up to 15 relevant terms).\n\n\
             Document:\n{text}"
        )),
    ]
}

pub fn web_resources(keywords: &[String], topic: &str, max: u32) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(JSON_ROLE),
        ChatMessage::user(format!(
            "Recommend up to {max} reputable, freely accessible online learning resources \
             (tutorials, course notes, documentation, encyclopedic articles) about \"{topic}\".\n\
             Relevant terms: {}.\n\
             Return a JSON array where each element has the keys \"title\", \"url\", \
             \"description\" and \"resource_type\" (for example \"article\", \"course\", \
             \"tutorial\", \"documentation\").",
            keywords.join(", ")
        )),
    ]
}

/// Search string for discovery services: the leading keywords, else the topic
pub fn search_query(keywords: &[String], topic: &str) -> String {
    let terms: Vec<&str> = keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .take(3)
        .collect();
    if terms.is_empty() {
        topic.trim().to_string()
    } else {
        terms.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ChatRole;

    #[test]
    fn test_flashcard_prompt_carries_count_and_text() {
        let messages = flashcards("Photosynthesis converts light.", 7);
        assert_eq!(messages[0].role, ChatRole::System);
        assert!(messages[1].content.contains("exactly 7 flashcards"));
        assert!(messages[1].content.ends_with("Photosynthesis converts light."));
    }

    #[test]
    fn test_answer_prompt_is_single_user_message() {
        let messages = answer("Doc", "What is it?");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, ChatRole::User);
        assert!(messages[0].content.contains("Question: What is it?"));
    }

    #[test]
    fn test_search_query_prefers_keywords() {
        let keywords = vec!["neural networks".to_string(), " ".to_string(), "backprop".to_string()];
        assert_eq!(search_query(&keywords, "Deep learning"), "neural networks backprop");
        assert_eq!(search_query(&[], " Deep learning "), "Deep learning");
    }
}
