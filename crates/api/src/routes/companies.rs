//! Company listing routes.

use axum::{Json, Router, extract::State, routing::get};

use crate::error::ApiResult;
use crate::{AppState, middleware::AuthUser};
use sheetwise_core::records::Company;

/// Creates the company routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/companies", get(list_companies))
}

/// GET /companies - Companies visible to the caller.
async fn list_companies(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<Vec<Company>>> {
    let companies = state.queries().list_visible_companies(&user).await?;
    Ok(Json(companies))
}
