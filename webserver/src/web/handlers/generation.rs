//! Study artifact generation and question answering
//!
//! Each handler reads the session text, trims it to the kind's character
//! budget and hands the collaborator call to the orchestrator. Timeouts on
//! summary, flashcards and quiz come back as placeholder content with a 200;
//! question answering has no placeholder and reports 408.

use axum::Json;
use axum::extract::State;
use shared::{Component, OperationKind, component_info};

use crate::error::{WebServerError, WebServerResult};
use crate::state::AppState;
use crate::types::{
    AnswerResponse, FlashcardsQuery, FlashcardsResponse, QuestionRequest, QuizQuery, QuizResponse, STATUS_SUCCESS,
    SummaryResponse,
};
use crate::web::{ApiQuery, SessionId};

pub async fn generate_summary(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> WebServerResult<Json<SummaryResponse>> {
    let session = state.require_session(&session_id).await?;
    let text = state.orchestrator.policies().prepare_text(OperationKind::Summary, &session.text).into_owned();

    component_info!(Component::Api, session_id = %session_id, chars = text.len(), "📝 Generating summary");

    let study = state.collaborators.study.clone();
    let summary = state
        .orchestrator
        .execute(OperationKind::Summary, async move { study.generate_summary(&text).await })
        .await
        .map_err(|e| WebServerError::from_operation(e, "Summary generation"))?
        .into_inner();

    Ok(Json(SummaryResponse {
        summary,
        status: STATUS_SUCCESS.to_string(),
    }))
}

pub async fn generate_flashcards(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    ApiQuery(query): ApiQuery<FlashcardsQuery>,
) -> WebServerResult<Json<FlashcardsResponse>> {
    let session = state.require_session(&session_id).await?;
    let policies = state.orchestrator.policies();
    let count = policies.clamp_count(OperationKind::Flashcards, query.num_cards);
    let text = policies.prepare_text(OperationKind::Flashcards, &session.text).into_owned();

    component_info!(Component::Api, session_id = %session_id, count, "🃏 Generating flashcards");

    let study = state.collaborators.study.clone();
    let flashcards = state
        .orchestrator
        .execute(OperationKind::Flashcards, async move { study.generate_flashcards(&text, count).await })
        .await
        .map_err(|e| WebServerError::from_operation(e, "Flashcard generation"))?
        .into_inner();

    Ok(Json(FlashcardsResponse {
        count: flashcards.len(),
        flashcards,
        status: STATUS_SUCCESS.to_string(),
    }))
}

pub async fn generate_quiz(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    ApiQuery(query): ApiQuery<QuizQuery>,
) -> WebServerResult<Json<QuizResponse>> {
    let session = state.require_session(&session_id).await?;
    let policies = state.orchestrator.policies();
    let count = policies.clamp_count(OperationKind::Quiz, query.num_questions);
    let text = policies.prepare_text(OperationKind::Quiz, &session.text).into_owned();

    component_info!(Component::Api, session_id = %session_id, count, "❓ Generating quiz");

    let study = state.collaborators.study.clone();
    let quiz = state
        .orchestrator
        .execute(OperationKind::Quiz, async move { study.generate_quiz(&text, count).await })
        .await
        .map_err(|e| WebServerError::from_operation(e, "Quiz generation"))?
        .into_inner();

    Ok(Json(QuizResponse {
        count: quiz.len(),
        quiz,
        status: STATUS_SUCCESS.to_string(),
    }))
}

/// Answer a question about caller-supplied text; independent of any session
pub async fn ask_question(
    State(state): State<AppState>,
    Json(request): Json<QuestionRequest>,
) -> WebServerResult<Json<AnswerResponse>> {
    let question = request.question.trim().to_string();
    if question.is_empty() {
        return Err(WebServerError::BadRequest("Question cannot be empty".to_string()));
    }
    if request.document_text.trim().is_empty() {
        return Err(WebServerError::BadRequest("No document text provided".to_string()));
    }

    let text = state
        .orchestrator
        .policies()
        .prepare_text(OperationKind::QuestionAnswer, &request.document_text)
        .into_owned();

    component_info!(Component::Api, chars = text.len(), "💬 Answering question");

    let study = state.collaborators.study.clone();
    let answer = state
        .orchestrator
        .execute(OperationKind::QuestionAnswer, async move {
            study.answer_question(&text, &question).await
        })
        .await
        .map_err(|e| WebServerError::from_operation(e, "Question answering"))?
        .into_inner();

    Ok(Json(AnswerResponse {
        answer,
        status: STATUS_SUCCESS.to_string(),
    }))
}
