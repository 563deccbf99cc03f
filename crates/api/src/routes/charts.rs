//! Chart routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde_json::Value;

use crate::error::ApiResult;
use crate::{AppState, middleware::AuthUser};
use sheetwise_core::charts::JsonChartRenderer;

/// Creates the chart routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/charts/{company_id}", get(company_chart))
}

/// GET /charts/{company_id} - Four-panel chart description for one company.
async fn company_chart(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(company_id): Path<i32>,
) -> ApiResult<Json<Value>> {
    let chart = state
        .queries()
        .render_chart(&JsonChartRenderer, &user, company_id)
        .await?;

    Ok(Json(chart))
}
