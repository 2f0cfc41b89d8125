// ============================================================================
// Storefront API - Session Middleware
// File: crates/storefront-api/src/middleware/session.rs
// ============================================================================
//! Resolves the session cookie into a [`CustomerSession`] request extension,
//! issuing a fresh session id when the cookie is missing or invalid.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use storefront_core::services::CustomerSession;
use storefront_shared::config::SessionSettings;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::state::AppState;

/// Response extension set by handlers that moved the customer to a new
/// session id. The middleware turns it into the session cookie.
#[derive(Debug, Clone)]
pub struct IssuedSession(pub String);

pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let settings = &state.config.session;
    let existing = session_id_from_cookies(request.headers(), &settings.cookie_name);

    let (session_id, is_new) = match existing {
        Some(id) => (id, false),
        None => {
            let id = Uuid::new_v4().to_string();
            debug!("Issuing new session {}", id);
            (id, true)
        }
    };

    request
        .extensions_mut()
        .insert(CustomerSession::new(session_id.clone(), state.sessions.clone()));

    let mut response = next.run(request).await;

    let cookie_id = match response.extensions_mut().remove::<IssuedSession>() {
        Some(IssuedSession(id)) => Some(id),
        None if is_new => Some(session_id),
        None => None,
    };

    if let Some(id) = cookie_id {
        match HeaderValue::from_str(&session_cookie(settings, &id)) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => warn!("Could not encode session cookie: {}", e),
        }
    }

    response
}

/// Session id from the `Cookie` headers. Ids that are not UUIDs are ignored.
fn session_id_from_cookies(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
        .map(|id| id.to_string())
}

fn session_cookie(settings: &SessionSettings, session_id: &str) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        settings.cookie_name, session_id, settings.ttl_seconds
    );
    if settings.cookie_secure {
        cookie.push_str("; Secure");
    }
    cookie
}
