//! Question answering routes.

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::{AppState, middleware::AuthUser};

/// Creates the question routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/ask", post(ask))
}

/// Request body for a question.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// Natural-language question.
    #[serde(default)]
    pub question: String,
    /// Restrict the context to one company.
    pub company_id: Option<i32>,
}

/// Response for a question.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    /// Model reply, or a placeholder if the model could not be reached.
    pub answer: String,
}

/// POST /ask - Answer a question over the caller's visible records.
async fn ask(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<AskRequest>,
) -> ApiResult<Json<AskResponse>> {
    let answer = state
        .queries()
        .answer_question(
            state.llm.as_ref(),
            &user,
            &payload.question,
            payload.company_id,
        )
        .await?;

    Ok(Json(AskResponse { answer }))
}
