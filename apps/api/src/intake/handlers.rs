use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::intake::models::{CandidateRecord, Stage};
use crate::intake::prompts::WELCOME_MESSAGE;
use crate::intake::session::{ChatMessage, Session, SharedSession};
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
    pub welcome: String,
}

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub reply: String,
    pub stage: Stage,
    pub stage_label: String,
    pub progress: f64,
    pub export_ready: bool,
}

/// Everything the chat UI needs to render progress, sidebar and transcript.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub stage: Stage,
    pub stage_label: String,
    pub current_field: usize,
    pub progress: f64,
    pub candidate_info: CandidateRecord,
    pub messages: Vec<ChatMessage>,
    pub export_ready: bool,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        let engine = session.engine();
        SessionView {
            session_id: session.id(),
            created_at: session.created_at(),
            stage: engine.stage(),
            stage_label: engine.stage().label().to_string(),
            current_field: engine.current_field(),
            progress: engine.progress_percent(),
            candidate_info: engine.candidate_info().clone(),
            messages: session.messages().to_vec(),
            export_ready: session.download_json().is_some(),
        }
    }
}

async fn find_session(state: &AppState, id: Uuid) -> Result<SharedSession, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<CreateSessionResponse>) {
    let session_id = state.sessions.create().await;
    (
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            session_id,
            welcome: WELCOME_MESSAGE.to_string(),
        }),
    )
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = find_session(&state, id).await?;
    let session = session.lock().await;
    Ok(Json(SessionView::from(&*session)))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Session {id} not found")))
    }
}

/// POST /api/v1/sessions/:id/messages
pub async fn handle_send_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<MessageRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    if req.content.trim().is_empty() {
        return Err(AppError::Validation("Message content must not be empty".to_string()));
    }

    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;
    let reply = session
        .handle_user_message(&req.content, state.llm.as_ref())
        .await;

    let engine = session.engine();
    Ok(Json(MessageResponse {
        reply,
        stage: engine.stage(),
        stage_label: engine.stage().label().to_string(),
        progress: engine.progress_percent(),
        export_ready: session.download_json().is_some(),
    }))
}

/// POST /api/v1/sessions/:id/reset
pub async fn handle_reset_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;
    session.reset();
    Ok(Json(SessionView::from(&*session)))
}

/// GET /api/v1/sessions/:id/export
/// Serves the completed record as a downloadable `application.json`.
pub async fn handle_export(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let session = find_session(&state, id).await?;
    let session = session.lock().await;
    let json = session
        .download_json()
        .ok_or_else(|| AppError::NotFound(format!("Session {id} has not completed the intake")))?
        .to_string();

    Ok((
        [
            (header::CONTENT_TYPE, "application/json"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"application.json\"",
            ),
        ],
        json,
    ))
}
