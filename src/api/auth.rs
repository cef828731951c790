use axum::{
    Extension, Json,
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::{ApiError, ApiResponse, AppState, AuthResponse};
use crate::auth::{AuthGate, GateDecision};
use crate::forms::{LoginForm, SignUpForm};

const SESSION_USER_KEY: &str = "user";

/// Email of the admin the current request was authenticated as.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub String);

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfoResponse {
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyResponse {
    pub api_key: String,
}

// ============================================================================
// Middleware
// ============================================================================

/// Looks up the caller's identity, checking in order:
/// 1. Session cookie (from login or sign-up)
/// 2. `X-Api-Key` header
/// 3. `Authorization: Bearer <api_key>` header
async fn identify(state: &AppState, headers: &HeaderMap, session: &Session) -> Option<String> {
    if let Ok(Some(user)) = session.get::<String>(SESSION_USER_KEY).await {
        return Some(user);
    }

    let key = extract_api_key(headers)?;
    match state.auth().verify_api_key(&key).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(error = %e, "API key lookup failed");
            None
        }
    }
}

async fn resolve_gate(state: &AppState, headers: &HeaderMap, session: &Session) -> AuthGate<String> {
    let login_path = state.config().read().await.server.login_path.clone();
    let mut gate = AuthGate::new(login_path);
    gate.resolve(identify(state, headers, session).await);
    gate
}

fn admit(user: String, mut request: Request) -> Request {
    tracing::Span::current().record("user_id", &user);
    request.extensions_mut().insert(CurrentUser(user));
    request
}

/// Gate for admin API routes: unauthenticated callers get `401`.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    session: Session,
    request: Request,
    next: Next,
) -> Response {
    match resolve_gate(&state, &headers, &session).await.decision() {
        GateDecision::Render(user) => next.run(admit(user, request)).await,
        GateDecision::Redirect(_) | GateDecision::Pending => {
            ApiError::Unauthorized("Authentication required".to_string()).into_response()
        }
    }
}

/// Gate for admin pages: unauthenticated visitors are sent to the login page.
pub async fn page_gate_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    session: Session,
    request: Request,
    next: Next,
) -> Response {
    match resolve_gate(&state, &headers, &session).await.decision() {
        GateDecision::Render(user) => next.run(admit(user, request)).await,
        GateDecision::Redirect(login_path) => Redirect::to(&login_path).into_response(),
        GateDecision::Pending => StatusCode::NO_CONTENT.into_response(),
    }
}

fn extract_api_key(headers: &HeaderMap) -> Option<String> {
    if let Some(api_key) = headers.get("X-Api-Key")
        && let Ok(key_str) = api_key.to_str()
    {
        return Some(key_str.to_string());
    }

    if let Some(auth_header) = headers.get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        return Some(token.trim().to_string());
    }

    None
}

// ============================================================================
// Handlers
// ============================================================================

async fn start_session(session: &Session, email: &str) -> Result<(), ApiError> {
    session
        .insert(SESSION_USER_KEY, email)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))
}

/// POST /auth/signup
pub async fn signup(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(form): Json<SignUpForm>,
) -> Result<(StatusCode, Json<ApiResponse<AuthResponse>>), ApiError> {
    let min_password_length = state.config().read().await.security.min_password_length;
    let credentials = form.validate(min_password_length)?;

    let result = state.auth().signup(&credentials).await?;
    start_session(&session, &result.email).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(AuthResponse {
            email: result.email,
            api_key: result.api_key,
        })),
    ))
}

/// POST /auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(form): Json<LoginForm>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    let credentials = form.validate()?;

    let result = state.auth().login(&credentials).await?;
    start_session(&session, &result.email).await?;

    Ok(Json(ApiResponse::success(AuthResponse {
        email: result.email,
        api_key: result.api_key,
    })))
}

/// POST /auth/logout
pub async fn logout(session: Session) -> impl IntoResponse {
    let _ = session.flush().await;
    (StatusCode::OK, "Logged out")
}

/// GET /auth/me
pub async fn get_current_user(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(email)): Extension<CurrentUser>,
) -> Result<Json<ApiResponse<UserInfoResponse>>, ApiError> {
    let user = state.auth().get_user_info(&email).await?;

    Ok(Json(ApiResponse::success(UserInfoResponse {
        email: user.email,
        created_at: user.created_at,
        updated_at: user.updated_at,
    })))
}

/// POST /auth/api-key/regenerate
pub async fn regenerate_api_key(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(email)): Extension<CurrentUser>,
) -> Result<Json<ApiResponse<ApiKeyResponse>>, ApiError> {
    let api_key = state.auth().regenerate_api_key(&email).await?;

    tracing::info!("API key regenerated for user: {email}");

    Ok(Json(ApiResponse::success(ApiKeyResponse { api_key })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_header_precedence() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_api_key(&headers), None);

        headers.insert("Authorization", "Bearer  abc ".parse().unwrap());
        assert_eq!(extract_api_key(&headers).as_deref(), Some("abc"));

        headers.insert("X-Api-Key", "xyz".parse().unwrap());
        assert_eq!(extract_api_key(&headers).as_deref(), Some("xyz"));
    }
}
