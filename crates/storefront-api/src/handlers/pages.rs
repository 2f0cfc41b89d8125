// ============================================================================
// Storefront API - Page Data Handlers
// File: crates/storefront-api/src/handlers/pages.rs
// ============================================================================
//! Page data as newline-delimited JSON.
//!
//! The first line carries the critical data and the names of the deferred
//! keys. Each deferred key then gets exactly one line, in the order the
//! fetchers settle:
//!
//! ```text
//! {"critical":{"header":{..}},"deferred":["footer","isLoggedIn"]}
//! {"key":"isLoggedIn","status":"ready","value":false}
//! {"key":"footer","status":"unavailable"}
//! ```

use std::convert::Infallible;

use axum::{
    body::Body,
    extract::{Extension, State},
    http::header,
    response::{IntoResponse, Response},
};
use futures::{stream, StreamExt};
use serde_json::{json, Value};
use storefront_core::services::{CustomerSession, DeferredValue, PageDataEnvelope};

use crate::error::ApiError;
use crate::state::AppState;

const NDJSON: &str = "application/x-ndjson";

/// GET /api/layout
pub async fn layout(
    State(state): State<AppState>,
    Extension(session): Extension<CustomerSession>,
) -> Result<Response, ApiError> {
    let envelope = state.loaders.layout(Some(session)).await?;
    Ok(ndjson_response(envelope))
}

/// GET /api/pages/home
pub async fn home(State(state): State<AppState>) -> Result<Response, ApiError> {
    let envelope = state.loaders.home().await?;
    Ok(ndjson_response(envelope))
}

fn deferred_line(key: String, value: DeferredValue) -> Value {
    match value {
        DeferredValue::Ready(value) => json!({ "key": key, "status": "ready", "value": value }),
        DeferredValue::Unavailable => json!({ "key": key, "status": "unavailable" }),
    }
}

fn ndjson_response(envelope: PageDataEnvelope) -> Response {
    let (critical, keys, deferred) = envelope.into_parts();
    let head = json!({ "critical": critical, "deferred": keys });

    // Dropping the body drops `deferred`, which aborts unfinished fetchers.
    let lines = stream::once(async move { head })
        .chain(deferred.map(|(key, value)| deferred_line(key, value)))
        .map(|line| Ok::<_, Infallible>(format!("{}\n", line)));

    ([(header::CONTENT_TYPE, NDJSON)], Body::from_stream(lines)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deferred_lines() {
        assert_eq!(
            deferred_line("footer".into(), DeferredValue::Ready(json!({"menu": []}))),
            json!({"key": "footer", "status": "ready", "value": {"menu": []}})
        );
        assert_eq!(
            deferred_line("isLoggedIn".into(), DeferredValue::Unavailable),
            json!({"key": "isLoggedIn", "status": "unavailable"})
        );
    }
}
