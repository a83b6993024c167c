//! Study artifact generators backed by the completion service

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use shared::{Component, Flashcard, QuizQuestion, component_warn};

use crate::core::{parse, prompt};
use crate::error::{AgentError, AgentResult};
use crate::traits::{CompletionClient, StudyGenerator};

const SUMMARY_MAX_TOKENS: u32 = 1200;
const FLASHCARDS_MAX_TOKENS: u32 = 2000;
const QUIZ_MAX_TOKENS: u32 = 2500;
const ANSWER_MAX_TOKENS: u32 = 800;

/// Summary, flashcard, quiz and question-answering agents sharing one client
#[derive(Clone)]
pub struct StudyAgents {
    client: Arc<dyn CompletionClient>,
}

impl StudyAgents {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }
}

/// Items of a list reply; a reply with no JSON array yields nothing so the
/// caller's placeholder policy applies
fn items_or_empty<T: DeserializeOwned>(reply: &str, artifact: &str) -> AgentResult<Vec<T>> {
    match parse::parse_items(reply) {
        Err(AgentError::MalformedReply { message }) => {
            component_warn!(Component::Agents, artifact, reason = %message, "⚠️ Unparseable reply, returning no items");
            Ok(Vec::new())
        }
        other => other,
    }
}

#[async_trait]
impl StudyGenerator for StudyAgents {
    async fn generate_summary(&self, text: &str) -> AgentResult<String> {
        let reply = self.client.chat(prompt::summary(text), SUMMARY_MAX_TOKENS).await?;
        Ok(reply.trim().to_string())
    }

    async fn generate_flashcards(&self, text: &str, count: u32) -> AgentResult<Vec<Flashcard>> {
        let reply = self.client.chat(prompt::flashcards(text, count), FLASHCARDS_MAX_TOKENS).await?;
        let mut cards: Vec<Flashcard> = items_or_empty(&reply, "flashcards")?;
        cards.retain(|card| !card.question.trim().is_empty() && !card.answer.trim().is_empty());
        cards.truncate(count as usize);
        Ok(cards)
    }

    async fn generate_quiz(&self, text: &str, count: u32) -> AgentResult<Vec<QuizQuestion>> {
        let reply = self.client.chat(prompt::quiz(text, count), QUIZ_MAX_TOKENS).await?;
        let mut questions: Vec<QuizQuestion> = items_or_empty(&reply, "quiz")?;
        questions.retain(QuizQuestion::is_well_formed);
        questions.truncate(count as usize);
        Ok(questions)
    }

    async fn answer_question(&self, text: &str, question: &str) -> AgentResult<String> {
        let reply = self.client.chat(prompt::answer(text, question), ANSWER_MAX_TOKENS).await?;
        Ok(reply.trim().to_string())
    }
}
