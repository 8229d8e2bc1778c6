//! Intake session endpoints.
//!
//! Each session is locked for the length of a turn. The map lock is only
//! held to look a session up, so turns on different sessions run in
//! parallel.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use ec_intake::slots::ConfidenceLevel;
use ec_intake::{DialogueQuestion, ExtractedSlotSet, Session, TurnOutcome, VocabularyTier};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::routes::calculate::CalculationResponse;
use crate::state::{AppState, SharedSession};

/// Snapshot of a session for clients.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub question: Option<DialogueQuestion>,
    pub tier: VocabularyTier,
    pub turns: u32,
    pub slots: ExtractedSlotSet,
    pub completion_percentage: u8,
    pub confidence_level: ConfidenceLevel,
    pub ready_to_calculate: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionView {
    fn new(state: &AppState, session: &Session) -> Self {
        Self {
            session_id: session.id,
            question: state.dialogue.current_question(session),
            tier: session.tier,
            turns: session.turns,
            slots: session.slots.clone(),
            completion_percentage: session.slots.completion_percentage(),
            confidence_level: session.slots.confidence_level(),
            ready_to_calculate: state.dialogue.is_ready(session),
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

async fn find(state: &AppState, id: Uuid) -> ApiResult<SharedSession> {
    state
        .session(id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("session '{id}' not found")))
}

/// POST /api/v1/sessions: open a session and ask the first question.
pub async fn create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionView>) {
    let (id, shared) = state.open_session().await;
    let mut session = shared.lock().await;
    state.dialogue.open(&mut session);
    tracing::info!(session_id = %id, "session opened");
    (StatusCode::CREATED, Json(SessionView::new(&state, &session)))
}

/// GET /api/v1/sessions/{id}
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SessionView>> {
    let shared = find(&state, id).await?;
    let session = shared.lock().await;
    Ok(Json(SessionView::new(&state, &session)))
}

/// DELETE /api/v1/sessions/{id}: discard partial state.
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    if !state.close_session(id).await {
        return Err(ApiError::NotFound(format!("session '{id}' not found")));
    }
    tracing::info!(session_id = %id, "session deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub session_id: Uuid,
    #[serde(flatten)]
    pub outcome: TurnOutcome,
}

/// POST /api/v1/sessions/{id}/messages: one dialogue turn.
pub async fn post_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<MessageRequest>,
) -> ApiResult<Json<MessageResponse>> {
    if req.message.trim().is_empty() {
        return Err(ApiError::BadRequest("message must not be empty".into()));
    }
    let shared = find(&state, id).await?;
    let mut session = shared.lock().await;
    let outcome = state.dialogue.handle_turn(&mut session, &req.message).await;
    Ok(Json(MessageResponse {
        session_id: id,
        outcome,
    }))
}

/// GET /api/v1/sessions/{id}/question: the next question, if any.
pub async fn get_question(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Option<DialogueQuestion>>> {
    let shared = find(&state, id).await?;
    let session = shared.lock().await;
    Ok(Json(state.dialogue.current_question(&session)))
}

/// POST /api/v1/sessions/{id}/calculate: calculate from the answers so far.
pub async fn calculate_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<CalculationResponse>> {
    let shared = find(&state, id).await?;
    let profile = {
        let session = shared.lock().await;
        state.dialogue.profile(&session)?
    };
    Ok(Json(CalculationResponse::for_profile(&profile)?))
}
