//! Request and response bodies for the auth endpoints.

use serde::{Deserialize, Serialize};

/// Body accepted by `POST /auth/register`. Fields missing from the JSON
/// deserialize to empty strings, and the handler validates from there.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Success body for `POST /auth/register`.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
    pub user_id: i64,
}

/// Body for the stubbed `POST /auth/login`.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
}
