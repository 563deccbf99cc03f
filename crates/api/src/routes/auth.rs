//! Authentication routes for signup and login.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use serde_json::json;
use tracing::{error, info};

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use sheetwise_core::access::validate_assignment;
use sheetwise_core::auth::{Principal, Role, UnknownRole, hash_password};
use sheetwise_core::records::RecordStore;
use sheetwise_db::to_principal;
use sheetwise_shared::AppError;
use sheetwise_shared::auth::{LoginRequest, LoginResponse, SignupRequest, UserInfo};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
}

fn user_info(user: &Principal) -> UserInfo {
    UserInfo {
        id: user.id,
        username: user.username.clone(),
        role: user.role.to_string(),
        company_id: user.company_id,
    }
}

/// POST /auth/signup - Register a new user.
async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> ApiResult<impl IntoResponse> {
    let username = payload.username();
    if username.is_empty() || payload.password.is_empty() {
        return Err(ApiError::validation("username and password are required"));
    }

    let role: Role = payload
        .role
        .parse()
        .map_err(|e: UnknownRole| ApiError::validation(e.to_string()))?;
    validate_assignment(role, payload.company_id)
        .map_err(|_| ApiError::validation("Non-admin users must have a company_id"))?;

    if let Some(company_id) = payload.company_id
        && state.record_store().find_company(company_id).await?.is_none()
    {
        return Err(ApiError::validation(format!("Company {company_id} does not exist")));
    }

    let password_hash = hash_password(&payload.password).map_err(|e| {
        error!(error = %e, "Failed to hash password");
        ApiError(AppError::Internal(e.to_string()))
    })?;

    let user = state
        .users()
        .create(username, &password_hash, role, payload.company_id)
        .await?;
    let principal = to_principal(user);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "user": user_info(&principal) })),
    ))
}

/// POST /auth/login - Authenticate user and return a session token.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let Some(user) = state
        .users()
        .authenticate(payload.username(), &payload.password)
        .await?
    else {
        info!(username = %payload.username(), "Failed login attempt");
        return Err(ApiError(AppError::Unauthorized(
            "Invalid username/password".to_string(),
        )));
    };

    let access_token = state
        .jwt_service
        .generate_access_token(user.id)
        .map_err(|e| {
            error!(error = %e, "Failed to generate access token");
            ApiError(AppError::Internal(e.to_string()))
        })?;

    info!(user_id = user.id, role = %user.role, "User logged in successfully");

    Ok(Json(LoginResponse {
        user: user_info(&user),
        access_token,
        expires_in: state.jwt_service.access_token_expires_in(),
    }))
}
