use crate::hotelhub::{
    handlers::{decode, ApiError},
    storage::{DynUserStore, StoreError, User},
    AuthState,
};
use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

const CREATE_FAILED: &str = "Error creating user";

#[derive(ToSchema, Deserialize)]
pub struct UserRegister {
    username: String,
    email: String,
    password: String,
}

impl std::fmt::Debug for UserRegister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRegister")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// The created account as returned to the client; the hash stays server-side.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
        }
    }
}

#[utoipa::path(
    post,
    path= "/register",
    request_body = UserRegister,
    responses (
        (status = 201, description = "Registration successful", body = UserResponse, content_type = "application/json"),
        (status = 400, description = "Malformed request body"),
        (status = 500, description = "Password hashing or storage failed"),
    ),
    tag= "register"
)]
// axum handler for register
#[instrument(skip_all)]
pub async fn register(
    store: Extension<DynUserStore>,
    auth: Extension<Arc<AuthState>>,
    payload: Result<Json<UserRegister>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = decode(payload)?;

    debug!("user: {:?}", user);

    let UserRegister {
        username,
        email,
        password,
    } = user;

    let hasher = *auth.hasher();
    let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| {
            error!("Password hashing task failed: {e}");
            ApiError::Internal(CREATE_FAILED)
        })?
        .map_err(|e| {
            error!("Failed to hash password: {e}");
            ApiError::Internal(CREATE_FAILED)
        })?;

    let created = match store.create_user(&email, &username, &password_hash).await {
        Ok(created) => created,
        Err(StoreError::Duplicate) => {
            error!("Failed to create user: email already registered");
            return Err(ApiError::Internal(CREATE_FAILED));
        }
        Err(e) => {
            error!("Failed to create user in database: {e}");
            return Err(ApiError::Internal(CREATE_FAILED));
        }
    };

    info!(user_id = %created.id, "User created successfully");

    Ok((StatusCode::CREATED, Json(UserResponse::from(created))))
}
