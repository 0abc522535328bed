use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginResponse, RegisterRequest, RegisterResponse},
        password::hash_password,
    },
    error::ApiError,
    extract::JsonBody,
    state::AppState,
    store::{NewUser, StoreError},
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

#[instrument(skip(state, body))]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let RegisterRequest {
        username,
        email,
        password,
    } = body;

    if email.is_empty() || password.is_empty() {
        warn!("missing email or password");
        return Err(ApiError::bad_request("Email and password are required"));
    }

    let password_hash = match hash_password(&password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "hash_password failed");
            return Err(ApiError::internal("Could not create user"));
        }
    };

    let new_user = NewUser {
        username,
        email: email.clone(),
        password_hash,
    };
    let user = match state.store.create_user(new_user).await {
        Ok(u) => u,
        Err(StoreError::DuplicateEmail) => {
            warn!(email = %email, "email already registered");
            return Err(ApiError::internal("Could not create user"));
        }
        Err(e) => {
            error!(error = %e, "create user failed");
            return Err(ApiError::internal("Could not create user"));
        }
    };

    info!(user_id = user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User created successfully",
            user_id: user.id,
        }),
    ))
}

/// Placeholder until credential verification lands. Answers 501 without
/// reading the request body.
#[instrument]
pub async fn login() -> (StatusCode, Json<LoginResponse>) {
    (
        StatusCode::NOT_IMPLEMENTED,
        Json(LoginResponse {
            message: "Login endpoint not fully implemented",
        }),
    )
}
