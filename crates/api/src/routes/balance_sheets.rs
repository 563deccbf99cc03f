//! Balance sheet query routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::{AppState, middleware::AuthUser};
use sheetwise_core::records::{FinancialRecord, YearRange};

/// Creates the balance sheet routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/balance-sheets", get(list_balance_sheets))
}

/// Query parameters for listing balance sheets.
#[derive(Debug, Default, Deserialize)]
pub struct BalanceSheetQuery {
    /// Restrict to one company.
    pub company_id: Option<i32>,
    /// Earliest year, inclusive.
    pub year_from: Option<i32>,
    /// Latest year, inclusive.
    pub year_to: Option<i32>,
}

/// Response for a balance sheet listing.
#[derive(Debug, Serialize)]
pub struct BalanceSheetsResponse {
    /// Records ordered by year, then company name.
    pub balance_sheets: Vec<FinancialRecord>,
}

/// GET /balance-sheets - Records visible to the caller.
///
/// A company outside the caller's scope yields an empty list.
async fn list_balance_sheets(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(params): Query<BalanceSheetQuery>,
) -> ApiResult<Json<BalanceSheetsResponse>> {
    let balance_sheets = state
        .queries()
        .query_records(
            &user,
            params.company_id,
            YearRange::new(params.year_from, params.year_to),
        )
        .await?;

    Ok(Json(BalanceSheetsResponse { balance_sheets }))
}
