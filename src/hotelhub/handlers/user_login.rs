use crate::hotelhub::{
    handlers::{decode, ApiError},
    storage::{DynUserStore, StoreError},
    token::IssuedToken,
    AuthState,
};
use anyhow::{Context, Result};
use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::{header::SET_COOKIE, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::{macros::format_description, Duration};
use tracing::{debug, error, info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

pub const TOKEN_COOKIE_NAME: &str = "token";

const LOGIN_FAILED: &str = "Error logging in";

#[derive(ToSchema, Deserialize)]
pub struct UserLogin {
    email: String,
    password: String,
}

impl std::fmt::Debug for UserLogin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserLogin")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LoginResponse {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub token: String,
}

#[utoipa::path(
    post,
    path= "/login",
    request_body = UserLogin,
    responses (
        (status = 200, description = "Login successful, also sets the `token` cookie", body = LoginResponse, content_type = "application/json"),
        (status = 400, description = "Malformed request body"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Storage or token signing failed"),
    ),
    tag= "login"
)]
// axum handler for login
#[instrument(skip_all)]
pub async fn login(
    store: Extension<DynUserStore>,
    auth: Extension<Arc<AuthState>>,
    payload: Result<Json<UserLogin>, JsonRejection>,
) -> Result<(StatusCode, HeaderMap, Json<LoginResponse>), ApiError> {
    let credentials = decode(payload)?;

    debug!("user: {:?}", credentials);

    let user = match store.find_user_by_email(&credentials.email).await {
        Ok(user) => user,
        Err(StoreError::NotFound) => {
            debug!("User not found");
            return Err(ApiError::Unauthorized);
        }
        Err(e) => {
            error!("Error getting user from database: {e}");
            return Err(ApiError::Internal(LOGIN_FAILED));
        }
    };

    let hasher = *auth.hasher();
    let stored_hash = user.password_hash.clone();
    let password = credentials.password;
    let verified = tokio::task::spawn_blocking(move || hasher.verify(&password, &stored_hash))
        .await
        .map_err(|e| {
            error!("Password verification task failed: {e}");
            ApiError::Internal(LOGIN_FAILED)
        })?;

    match verified {
        Ok(true) => (),
        Ok(false) => {
            debug!("Invalid password");
            return Err(ApiError::Unauthorized);
        }
        Err(e) => {
            error!(user_id = %user.id, "Stored password hash is unusable: {e}");
            return Err(ApiError::Unauthorized);
        }
    }

    let issued = auth.issuer().issue(&user.id.to_string()).map_err(|e| {
        error!("Failed to sign token: {e}");
        ApiError::Internal(LOGIN_FAILED)
    })?;

    let cookie = session_cookie(&issued, auth.issuer().ttl(), auth.cookie_secure()).map_err(|e| {
        error!("Failed to build session cookie: {e:#}");
        ApiError::Internal(LOGIN_FAILED)
    })?;

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);

    info!(user_id = %user.id, "User logged in successfully");

    Ok((
        StatusCode::OK,
        headers,
        Json(LoginResponse {
            user_id: user.id,
            token: issued.token,
        }),
    ))
}

/// Build the `HttpOnly` cookie carrying the token, expiring with it.
fn session_cookie(issued: &IssuedToken, ttl: Duration, secure: bool) -> Result<HeaderValue> {
    let expires = issued
        .expires_at
        .format(format_description!(
            "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
        ))
        .context("Failed to format cookie expiry")?;

    let mut cookie = format!(
        "{TOKEN_COOKIE_NAME}={}; Path=/; HttpOnly; SameSite=Lax; Expires={expires}; Max-Age={}",
        issued.token,
        ttl.whole_seconds()
    );
    // Only mark cookies secure when served over HTTPS.
    if secure {
        cookie.push_str("; Secure");
    }

    HeaderValue::from_str(&cookie).context("Invalid cookie header value")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn issued() -> IssuedToken {
        IssuedToken {
            token: "header.payload.signature".to_string(),
            expires_at: OffsetDateTime::from_unix_timestamp(1_445_412_480).unwrap(),
        }
    }

    #[test]
    fn cookie_carries_token_and_expiry() {
        let cookie = session_cookie(&issued(), Duration::hours(24), false).unwrap();
        assert_eq!(
            cookie.to_str().unwrap(),
            "token=header.payload.signature; Path=/; HttpOnly; SameSite=Lax; \
             Expires=Wed, 21 Oct 2015 07:28:00 GMT; Max-Age=86400"
        );
    }

    #[test]
    fn secure_cookie_flag() {
        let cookie = session_cookie(&issued(), Duration::hours(24), true).unwrap();
        assert!(cookie.to_str().unwrap().ends_with("; Secure"));
    }

    #[test]
    fn login_response_uses_user_id_key() {
        let response = LoginResponse {
            user_id: Uuid::nil(),
            token: "t".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["userId"], Uuid::nil().to_string());
        assert_eq!(json["token"], "t");
    }

    #[test]
    fn login_payload_ignores_username() {
        let parsed: UserLogin = serde_json::from_str(
            r#"{"username":"alice","email":"a@x.com","password":"pw"}"#,
        )
        .unwrap();
        assert_eq!(parsed.email, "a@x.com");
    }
}
