// ============================================================================
// Storefront API - Account Handlers
// File: crates/storefront-api/src/handlers/account.rs
// ============================================================================
//! Customer account routes (login, register, recover, profile, logout)

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use serde_json::{json, Value};
use storefront_core::domain::CustomerAccessToken;
use storefront_core::services::{
    CustomerSession, LoginForm, ProfileForm, RecoverForm, RegisterForm,
};
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::IssuedSession;
use crate::state::AppState;

const ACCOUNT_PATH: &str = "/account";
const LOGIN_PATH: &str = "/account/login";

/// Signed-in customers have no business on the login, register and recover
/// pages; send them to their account instead.
async fn redirect_if_logged_in(session: &CustomerSession) -> Result<Response, ApiError> {
    if session.is_logged_in().await? {
        return Ok(Redirect::to(ACCOUNT_PATH).into_response());
    }
    Ok(Json(json!({})).into_response())
}

/// Stores the token under a freshly issued session id and redirects to the account.
async fn signed_in(
    session: &CustomerSession,
    token: &CustomerAccessToken,
) -> Result<Response, ApiError> {
    let renewed = session.sign_in(Uuid::new_v4().to_string(), token).await?;
    let mut response = Redirect::to(ACCOUNT_PATH).into_response();
    response
        .extensions_mut()
        .insert(IssuedSession(renewed.id().to_string()));
    Ok(response)
}

/// GET /account/login
pub async fn login_page(
    Extension(session): Extension<CustomerSession>,
) -> Result<Response, ApiError> {
    redirect_if_logged_in(&session).await
}

/// GET /account/register
pub async fn register_page(
    Extension(session): Extension<CustomerSession>,
) -> Result<Response, ApiError> {
    redirect_if_logged_in(&session).await
}

/// GET /account/recover
pub async fn recover_page(
    Extension(session): Extension<CustomerSession>,
) -> Result<Response, ApiError> {
    redirect_if_logged_in(&session).await
}

/// POST /account/login
pub async fn login(
    State(state): State<AppState>,
    Extension(session): Extension<CustomerSession>,
    Form(form): Form<LoginForm>,
) -> Result<Response, ApiError> {
    let token = state.accounts.login(&form).await?;
    signed_in(&session, &token).await
}

/// POST /account/register
pub async fn register(
    State(state): State<AppState>,
    Extension(session): Extension<CustomerSession>,
    Form(form): Form<RegisterForm>,
) -> Result<Response, ApiError> {
    let result = state.accounts.register(&form).await?;
    signed_in(&session, &result.access_token).await
}

/// POST /account/recover
pub async fn recover(
    State(state): State<AppState>,
    Form(form): Form<RecoverForm>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    match state.accounts.recover(&form).await {
        Ok(()) => Ok((StatusCode::OK, Json(json!({ "resetRequested": true })))),
        Err(e) if e.is_user_facing() => Ok((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string(), "resetRequested": false })),
        )),
        Err(e) => Err(e.into()),
    }
}

/// GET /account/profile
pub async fn profile_page(
    Extension(session): Extension<CustomerSession>,
) -> Result<Response, ApiError> {
    if session.access_token().await?.is_none() {
        return Ok(Redirect::to(LOGIN_PATH).into_response());
    }
    Ok(Json(json!({})).into_response())
}

/// PUT /account/profile
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(session): Extension<CustomerSession>,
    Form(form): Form<ProfileForm>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Some(token) = session.access_token().await? else {
        return Ok((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Unauthorized" })),
        ));
    };

    match state.accounts.update_profile(&token, &form).await {
        Ok(result) => {
            if let Some(rotated) = &result.access_token {
                session.set_access_token(rotated).await?;
            }
            Ok((
                StatusCode::OK,
                Json(json!({ "error": null, "customer": result.customer })),
            ))
        }
        Err(e) if e.is_user_facing() => Ok((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string(), "customer": null })),
        )),
        Err(e) => Err(e.into()),
    }
}

/// POST /account/logout
pub async fn logout(
    Extension(session): Extension<CustomerSession>,
) -> Result<Redirect, ApiError> {
    session.clear_access_token().await?;
    info!("Session {} logged out", session.id());
    Ok(Redirect::to("/"))
}
