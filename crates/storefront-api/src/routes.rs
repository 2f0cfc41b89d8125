use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::handlers::{account, health, pages};
use crate::middleware::session_middleware;
use crate::state::AppState;

/// Build the application router. Health probes skip the session layer.
pub fn create_router(state: AppState) -> Router {
    let session_routes = Router::new()
        .route("/api/layout", get(pages::layout))
        .route("/api/pages/home", get(pages::home))
        .route(
            "/account/login",
            get(account::login_page).post(account::login),
        )
        .route(
            "/account/register",
            get(account::register_page).post(account::register),
        )
        .route(
            "/account/recover",
            get(account::recover_page).post(account::recover),
        )
        .route(
            "/account/profile",
            get(account::profile_page).put(account::update_profile),
        )
        .route("/account/logout", post(account::logout))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .merge(session_routes)
        .with_state(state)
}
